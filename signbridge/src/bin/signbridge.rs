use clap::{Arg, Command};
use signbridge::config::DEFAULT_STATIC_DIR;
use signbridge::{MatchKind, SignConfig, SignError, SignTranslator, Translation};
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = Command::new("signbridge")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Translate spoken-language text into a sign clip playlist")
        .arg(
            Arg::new("text")
                .help("Text to translate")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("static-dir")
                .long("static-dir")
                .short('d')
                .env("SIGNBRIDGE_STATIC_DIR")
                .help("Media root containing words/ and alphabet/")
                .default_value(DEFAULT_STATIC_DIR),
        )
        .arg(
            Arg::new("vectors")
                .long("vectors")
                .env("SIGNBRIDGE_VECTORS")
                .help("Word-vector table enabling embedding similarity"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .short('j')
                .help("Print the response body as JSON")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log catalog loading and matching decisions")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let text = matches
        .get_one::<String>("text")
        .map(String::as_str)
        .unwrap_or_default();
    let static_dir = matches
        .get_one::<String>("static-dir")
        .map(String::as_str)
        .unwrap_or(DEFAULT_STATIC_DIR);
    let vectors = matches.get_one::<String>("vectors").map(PathBuf::from);
    let as_json = matches.get_flag("json");
    let verbose = matches.get_flag("verbose");

    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    if text.trim().is_empty() {
        return Err(SignError::InvalidInput("Text is empty".to_string()).into());
    }

    let config = SignConfig::new(static_dir).with_vectors(vectors);
    config.validate()?;

    let translator = SignTranslator::from_config(&config);
    if verbose {
        eprintln!("📂 {:?}", translator);
    }

    let translation = translator.translate(text);

    if as_json {
        println!("{}", serde_json::to_string_pretty(&translation)?);
    } else {
        for record in &translation.results {
            let marker = match record.kind {
                MatchKind::Exact => "🎯",
                MatchKind::Fuzzy => "🤖",
                MatchKind::Letter => "🔤",
            };
            println!(
                "{} {:<20} {:<20} {}",
                marker, record.source_token, record.matched_key, record.clip
            );
        }
        for token in &translation.unmatched {
            eprintln!("⚠️  No sign for '{}'", token);
        }
    }

    ensure_matched(text, &translation)?;

    Ok(())
}

/// Fail with `NoMatch` when text with words in it produced no clips at all
fn ensure_matched(text: &str, translation: &Translation) -> Result<(), SignError> {
    if translation.is_empty() && !signbridge::tokenize(text).is_empty() {
        return Err(SignError::NoMatch(format!("'{}'", text)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use signbridge::MatchRecord;

    #[test]
    fn test_ensure_matched_rejects_words_without_clips() {
        let translation = Translation {
            results: vec![],
            unmatched: vec!["zz".to_string()],
        };
        match ensure_matched("zz!", &translation) {
            Err(SignError::NoMatch(msg)) => assert_eq!(msg, "'zz!'"),
            other => panic!("Expected NoMatch error, got {:?}", other),
        }
    }

    #[test]
    fn test_ensure_matched_accepts_clips_and_wordless_text() {
        let translation = Translation {
            results: vec![MatchRecord {
                source_token: "hello".to_string(),
                matched_key: "hello".to_string(),
                clip: "static/words/hello.mp4".to_string(),
                kind: MatchKind::Exact,
            }],
            unmatched: vec![],
        };
        assert!(ensure_matched("hello", &translation).is_ok());

        // Nothing to sign is not a failed match
        assert!(ensure_matched("123 ?!", &Translation::default()).is_ok());
    }
}
