//! Human-readable report written to stdout.

use std::io::{self, Write};

use super::Outcome;

pub const INTRO_MARKER: &str = "🤖";
pub const SUCCESS_MARKER: &str = "✅ SUCCÈS :";
pub const FAILURE_MARKER: &str = "❌ ERREUR :";

/// `gemini-2.5-flash` → `Gemini 2.5 Flash`
pub fn display_model_name(model: &str) -> String {
    let model = model.trim();
    model
        .strip_prefix("models/")
        .unwrap_or(model)
        .split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

pub fn write_intro<W: Write>(out: &mut W, model: &str) -> io::Result<()> {
    writeln!(out, "{} Test de {}...", INTRO_MARKER, display_model_name(model))?;
    out.flush()
}

pub fn write_outcome<W: Write>(out: &mut W, outcome: &Outcome) -> io::Result<()> {
    match outcome {
        Outcome::Succeeded { text } => writeln!(out, "\n{}\n{}", SUCCESS_MARKER, text)?,
        Outcome::Failed { message } => writeln!(out, "\n{} {}", FAILURE_MARKER, message)?,
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(outcome: &Outcome) -> String {
        let mut buf = Vec::new();
        write_intro(&mut buf, "gemini-2.5-flash").unwrap();
        write_outcome(&mut buf, outcome).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_display_model_name() {
        assert_eq!(display_model_name("gemini-2.5-flash"), "Gemini 2.5 Flash");
        assert_eq!(
            display_model_name("models/gemini-2.5-flash-lite"),
            "Gemini 2.5 Flash Lite"
        );
        assert_eq!(display_model_name("gemini-exp--1206"), "Gemini Exp 1206");
    }

    #[test]
    fn test_success_report() {
        let report = render(&Outcome::Succeeded {
            text: "Bonjour à tous !".into(),
        });
        assert_eq!(
            report,
            "🤖 Test de Gemini 2.5 Flash...\n\n✅ SUCCÈS :\nBonjour à tous !\n"
        );
    }

    #[test]
    fn test_failure_report() {
        let report = render(&Outcome::Failed {
            message: "Authentication failed: API key not valid".into(),
        });
        assert_eq!(
            report,
            "🤖 Test de Gemini 2.5 Flash...\n\n❌ ERREUR : Authentication failed: API key not valid\n"
        );
    }
}
