//! End-to-end pipeline tests: tokenize, match, render, plus theme files,
//! background detection, and adaptation working together.

use logsdx::theme::{
    adaptive, adjust_theme_for_terminal, BackgroundInfo, BackgroundScheme, Theme,
};
use logsdx::{
    tokenize, HtmlStyleFormat, LogProcessor, OutputFormat, ProcessorOptions, StyleDescriptor,
};
use proptest::prelude::*;

fn dark_background() -> BackgroundInfo {
    BackgroundInfo::default_dark()
}

fn processor(options: ProcessorOptions) -> LogProcessor {
    LogProcessor::with_background(options, &dark_background())
}

#[test]
fn canonical_line_end_to_end() {
    // Word match beats pattern beats default: ERROR is a word match, 42 a
    // pattern match, "occurred" falls to the default style.
    let theme = Theme::named("t")
        .default_style(StyleDescriptor::color("white").unwrap())
        .word("ERROR", StyleDescriptor::color("red").unwrap().bold())
        .pattern(
            "number",
            r"^-?\d+(?:\.\d+)?$",
            StyleDescriptor::color("yellow").unwrap(),
        )
        .unwrap();

    let out = processor(ProcessorOptions::default().theme(theme)).process_line("ERROR 42 occurred");
    assert_eq!(
        out,
        "\x1b[31;1mERROR\x1b[0m \x1b[33m42\x1b[0m \x1b[37moccurred\x1b[0m"
    );
}

#[test]
fn html_whitespace_scenario() {
    let out = processor(
        ProcessorOptions::default()
            .theme(Theme::named("bare"))
            .format(OutputFormat::Html(HtmlStyleFormat::InlineCss)),
    )
    .process_line("a\tb  c\nd");
    assert_eq!(out, "a&nbsp;b&nbsp;&nbsp;c<br>d");
}

#[test]
fn html_injection_is_inert() {
    let out = processor(
        ProcessorOptions::default().format(OutputFormat::Html(HtmlStyleFormat::InlineCss)),
    )
    .process_line("<script>alert('x')</script> ERROR");
    // Every token is span-wrapped by the default style, so the markup
    // characters sit escaped inside their own spans.
    assert!(!out.contains("<script"));
    assert!(out.contains("&lt;"));
    assert!(out.contains("&gt;"));
    assert!(out.contains("&#39;x&#39;"));
    // Styling still applies around the escaped content.
    assert!(out.contains("ERROR</span>"));
}

#[test]
fn colorfgbg_dark_scenario_selects_dark_theme() {
    // COLORFGBG="15;0" means white on black: a dark background at high
    // confidence, so a theme pair resolves to its dark member.
    let info = adaptive::detect_from_env(|key| {
        (key == "COLORFGBG").then(|| "15;0".to_string())
    });
    assert_eq!(info.scheme, BackgroundScheme::Dark);
    assert!(info.is_dark());

    let light = Theme::named("pair-light");
    let dark = Theme::named("pair-dark");
    let processor = LogProcessor::with_background(
        ProcessorOptions::default().theme_pair(light, dark),
        &info,
    );
    assert_eq!(processor.theme().name(), "pair-dark");
}

#[test]
fn adaptation_is_idempotent_through_the_pipeline() {
    let theme = Theme::named("paper-light")
        .default_style(StyleDescriptor::color("black").unwrap())
        .word("ERROR", StyleDescriptor::color("#1a0000").unwrap().bold());

    let once = adjust_theme_for_terminal(&theme, true);
    let twice = adjust_theme_for_terminal(&once, true);
    assert_eq!(once, twice);

    let line = "ERROR something";
    let a = processor(ProcessorOptions::default().theme(once)).process_line(line);
    let b = processor(ProcessorOptions::default().theme(twice)).process_line(line);
    assert_eq!(a, b);
}

#[test]
fn encodings_agree_on_text() {
    // The same line through ANSI and HTML carries the same visible text.
    let line = "2024-01-15T10:30:00Z WARN cache=cold latency=103.4";
    let ansi = processor(ProcessorOptions::default()).process_line(line);
    let html = processor(
        ProcessorOptions::default().format(OutputFormat::Html(HtmlStyleFormat::ClassName)),
    )
    .process_line(line);

    let ansi_text = console::strip_ansi_codes(&ansi);
    assert_eq!(ansi_text, line);

    let html_text = html
        .replace("&nbsp;", " ")
        .replace("<br>", "\n");
    let html_text = regex::Regex::new("<[^>]*>")
        .unwrap()
        .replace_all(&html_text, "");
    assert_eq!(html_text, line);
}

#[test]
fn theme_file_round_trip() {
    use std::io::Write;

    let doc = r#"
name: custom
description: test theme
mode: dark
schema:
  defaultStyle: white
  matchWords:
    ERROR:
      color: red
      styleCodes: [bold]
"#;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ops-dark.yaml");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(doc.as_bytes()).unwrap();

    let theme = Theme::from_file(&path).unwrap();
    // The default document name yields to the file stem.
    assert_eq!(theme.name(), "ops-dark");

    let out = processor(ProcessorOptions::default().theme(theme)).process_line("ERROR boom");
    assert!(out.contains("\x1b[31;1mERROR\x1b[0m"));
}

#[test]
fn unknown_theme_name_still_styles() {
    let out = processor(ProcessorOptions::default().theme_name("not-a-theme"))
        .process_line("INFO ready");
    assert!(out.contains("INFO"));
    assert!(out.contains('\x1b'));
}

// ==================== Properties ====================

proptest! {
    #[test]
    fn tokenize_round_trips_any_line(line in "\\PC{0,120}") {
        let rebuilt: String = tokenize(&line).iter().map(|t| t.content.as_str()).collect();
        prop_assert_eq!(rebuilt, line);
    }

    #[test]
    fn ansi_output_strips_back_to_input(line in "[a-zA-Z0-9 .:=_-]{0,80}") {
        let out = processor(ProcessorOptions::default()).process_line(&line);
        prop_assert_eq!(console::strip_ansi_codes(&out).into_owned(), line);
    }

    #[test]
    fn processing_is_deterministic(line in "\\PC{0,80}") {
        let p = processor(ProcessorOptions::default());
        prop_assert_eq!(p.process_line(&line), p.process_line(&line));
    }

    #[test]
    fn html_output_never_leaks_raw_angle_brackets(line in "\\PC{0,80}") {
        let out = processor(
            ProcessorOptions::default().format(OutputFormat::Html(HtmlStyleFormat::InlineCss)),
        )
        .process_line(&line);
        // Every '<' in the output belongs to a generated tag.
        let stripped = regex::Regex::new("</?(span|br)[^>]*>")
            .unwrap()
            .replace_all(&out, "");
        prop_assert!(!stripped.contains('<'));
        prop_assert!(!stripped.contains('>'));
    }
}
