//! End-to-end tests: media directories on disk through to playlists

#[cfg(test)]
mod tests {
    use super::super::*;
    use std::fs;
    use std::path::Path;

    /// Lay out `<root>/words` and `<root>/alphabet` with empty clip files
    fn media_root(words: &[&str], letters: &str) -> tempfile::TempDir {
        let root = tempfile::tempdir().unwrap();
        let words_dir = root.path().join("words");
        let alphabet_dir = root.path().join("alphabet");
        fs::create_dir_all(&words_dir).unwrap();
        fs::create_dir_all(&alphabet_dir).unwrap();
        for name in words {
            fs::write(words_dir.join(name), b"").unwrap();
        }
        for c in letters.chars() {
            fs::write(alphabet_dir.join(format!("{}.mp4", c)), b"").unwrap();
        }
        root
    }

    fn translator_for(root: &Path) -> SignTranslator {
        SignTranslator::from_config(&SignConfig::new(root))
    }

    #[test]
    fn test_e2e_phrases_fuzzy_and_letters() {
        let root = media_root(
            &["hello.mp4", "how_are_you.mp4", "good-morning.gif", "thank_you.mp4"],
            "abcdefghijklmnopqrstuvwxyz",
        );
        let translator = translator_for(root.path());
        assert_eq!(translator.catalog().len(), 4);
        assert_eq!(translator.letters().len(), 26);
        assert_eq!(translator.scorer_name(), "sequence");

        let translation = translator.translate("Good morning! Helo, how are you? Thanks, Sam.");
        let rows: Vec<(MatchKind, &str, &str, &str)> = translation
            .results
            .iter()
            .map(|r| {
                (
                    r.kind,
                    r.source_token.as_str(),
                    r.matched_key.as_str(),
                    r.clip.as_str(),
                )
            })
            .collect();

        assert_eq!(
            rows,
            vec![
                (MatchKind::Exact, "good morning", "good morning", "static/words/good-morning.gif"),
                (MatchKind::Fuzzy, "helo", "hello", "static/words/hello.mp4"),
                (MatchKind::Exact, "how are you", "how are you", "static/words/how_are_you.mp4"),
                (MatchKind::Fuzzy, "thanks", "thank you", "static/words/thank_you.mp4"),
                (MatchKind::Letter, "sam", "s", "static/alphabet/s.mp4"),
                (MatchKind::Letter, "sam", "a", "static/alphabet/a.mp4"),
                (MatchKind::Letter, "sam", "m", "static/alphabet/m.mp4"),
            ]
        );
        assert!(translation.unmatched.is_empty());
    }

    #[test]
    fn test_e2e_missing_media_root_still_translates() {
        let translator = translator_for(Path::new("/no/such/media/root"));
        assert!(translator.catalog().is_empty());
        assert!(translator.letters().is_empty());

        let translation = translator.translate("hello world");
        assert!(translation.is_empty());
        assert_eq!(translation.unmatched, vec!["hello", "world"]);
    }

    #[test]
    fn test_e2e_partial_alphabet() {
        let root = media_root(&["hello.mp4"], "h");
        let translation = translator_for(root.path()).translate("hi");
        assert_eq!(translation.results.len(), 1);
        assert_eq!(translation.results[0].matched_key, "h");
        assert_eq!(translation.results[0].kind, MatchKind::Letter);
    }

    #[test]
    fn test_e2e_embedding_mode() {
        let root = media_root(&["hello.mp4", "goodbye.mp4"], "");
        let vectors_path = root.path().join("vectors.txt");
        fs::write(
            &vectors_path,
            "4 2\nhello 1.0 0.0\nhi 0.9 0.1\ngoodbye 0.0 1.0\nbye 0.1 0.9\n",
        )
        .unwrap();

        let config = SignConfig::new(root.path()).with_vectors(Some(vectors_path));
        let translator = SignTranslator::from_config(&config);
        assert_eq!(translator.scorer_name(), "embedding");
        assert!(translator.catalog().get("hello").unwrap().fingerprint().is_some());

        let translation = translator.translate("hi bye");
        let matched: Vec<(&str, MatchKind)> = translation
            .results
            .iter()
            .map(|r| (r.matched_key.as_str(), r.kind))
            .collect();
        assert_eq!(
            matched,
            vec![("hello", MatchKind::Fuzzy), ("goodbye", MatchKind::Fuzzy)]
        );
    }

    #[test]
    fn test_e2e_translation_json_shape() {
        let root = media_root(&["hello.mp4"], "x");
        let translation = translator_for(root.path()).translate("hello qq");
        let json = serde_json::to_value(&translation).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "results": [{
                    "original_word": "hello",
                    "matched_word": "hello",
                    "path": "static/words/hello.mp4",
                    "match_type": "exact"
                }],
                "unmatched": ["qq"]
            })
        );
    }
}
