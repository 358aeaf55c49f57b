// tests/extractor.rs
use icfes_scores::extract::settings::Subject;
use icfes_scores::{DecodeRules, ExtractorSettings, ScoreExtractor};

const HEADER: &str = "Lectura Crítica Matemáticas Sociales y Ciudadanas Ciencias Naturales Inglés";

fn subjects(ex: &ScoreExtractor, text: &str) -> Vec<Option<u8>> {
    ex.extract(text).subject_scores().iter().map(|s| s.score).collect()
}

#[test]
fn text_without_digits_yields_nothing() {
    let ex = ScoreExtractor::default();
    for text in ["", "Lectura Crítica Matemáticas Sociales", "sin resultados\n\n  \t", HEADER] {
        let rec = ex.extract(text);
        assert!(rec.is_empty(), "{text:?}");
        assert_eq!(rec.missing_fields().len(), 6);
    }
}

#[test]
fn global_score_found_anywhere() {
    let ex = ScoreExtractor::default();
    let placements = [
        "245/500",
        "Puntaje global 245/500",
        "245/500 al inicio",
        "linea uno\nPUNTAJE GLOBAL\n   245/500   \nfin",
        "x245/500y",
    ];
    for text in placements {
        assert_eq!(ex.extract(text).global_score(), Some(245), "{text:?}");
    }
    assert_eq!(ex.extract("Puntaje: 87/500").global_score(), Some(87));
    assert_eq!(ex.extract("Puntaje: 7/500").global_score(), Some(7));
}

#[test]
fn global_score_uses_first_match_only() {
    let ex = ScoreExtractor::default();
    assert_eq!(ex.extract("300/500 luego 250/500").global_score(), Some(300));
    // 999 is out of range; the later valid match is not consulted
    assert_eq!(ex.extract("999/500 luego 250/500").global_score(), None);
    assert_eq!(ex.extract("245 / 500").global_score(), None);
}

#[test]
fn clean_line_assigns_canonical_order() {
    let ex = ScoreExtractor::default();
    let text = format!("{HEADER}\n57 52 46 44 48\n");
    let rec = ex.extract(&text);

    assert_eq!(rec.subject("Lectura Crítica"), Some(57));
    assert_eq!(rec.subject("Matemáticas"), Some(52));
    assert_eq!(rec.subject("Sociales y Ciudadanas"), Some(46));
    assert_eq!(rec.subject("Ciencias Naturales"), Some(44));
    assert_eq!(rec.subject("Inglés"), Some(48));
    assert_eq!(rec.global_score(), None);
}

#[test]
fn merged_tokens_decode() {
    let ex = ScoreExtractor::default();

    let text = format!("{HEADER}\n57100 52 46 44 48");
    assert_eq!(subjects(&ex, &text)[0], Some(57));

    let text = format!("{HEADER}\n407100 52 46 44 48");
    assert_eq!(subjects(&ex, &text)[0], Some(40));

    let text = format!("{HEADER}\n157 52 46 44 48");
    assert_eq!(subjects(&ex, &text)[0], Some(57));

    let text = format!("{HEADER}\n5700 52 46 44 48");
    assert_eq!(subjects(&ex, &text)[0], Some(57));
}

#[test]
fn zero_candidates_are_excluded() {
    let ex = ScoreExtractor::default();

    // six runs, one decodes to 0: the other five fill the slots
    let text = format!("{HEADER}\n57 00 52 46 44 48");
    assert_eq!(
        subjects(&ex, &text),
        vec![Some(57), Some(52), Some(46), Some(44), Some(48)]
    );

    // five runs, one decodes to 0: the line does not qualify
    let text = format!("{HEADER}\n57 00 46 44 48");
    assert!(subjects(&ex, &text).iter().all(Option::is_none));
}

#[test]
fn line_short_of_valid_candidates_falls_through_to_next() {
    let ex = ScoreExtractor::default();
    // five runs, but two decode to 0
    let text = format!("{HEADER}\n57 00 46 00 48\n57 52 46 44 48");
    assert_eq!(
        subjects(&ex, &text),
        vec![Some(57), Some(52), Some(46), Some(44), Some(48)]
    );
}

#[test]
fn only_ascii_digits_count() {
    let ex = ScoreExtractor::default();
    assert_eq!(ex.extract("\u{662}\u{664}\u{665}/500").global_score(), None);
    assert_eq!(ex.extract("\u{662}\u{664}\u{665}/500 y 245/500").global_score(), Some(245));

    // Arabic-Indic runs are not tokens, so this line is one run short
    let text = format!("{HEADER}\n57 52 46 44 \u{664}\u{668}\n60 70 65 55 80");
    assert_eq!(subjects(&ex, &text)[0], Some(60));
}

#[test]
fn extraction_is_idempotent() {
    let ex = ScoreExtractor::default();
    let text = format!("{HEADER}\n57100 52100 46 44 48\nGlobal 245/500");
    assert_eq!(ex.extract(&text), ex.extract(&text));
}

#[test]
fn end_to_end_report_page() {
    let ex = ScoreExtractor::default();
    let text = format!(
        "RESULTADOS EXAMEN SABER 11\n\
         Puntaje global\n\
         245/500\n\
         Resultados por prueba\n\
         {HEADER}\n\
         57100 52100 46100 44100 48100\n\
         Percentil nacional"
    );
    let rec = ex.extract(&text);

    assert!(rec.is_complete());
    assert_eq!(rec.global_score(), Some(245));
    assert_eq!(
        rec.to_cells(),
        vec!["57", "52", "46", "44", "48", "245"]
    );
}

#[test]
fn scores_on_second_line_below_header() {
    let ex = ScoreExtractor::default();
    // the line right under the header has only two runs
    let text = format!("{HEADER}\nPuntaje 1 de 2\n57 52 46 44 48");
    assert_eq!(subjects(&ex, &text)[4], Some(48));

    // beyond the lookahead window
    let text = format!("{HEADER}\na\nb\nc\n57 52 46 44 48");
    assert!(subjects(&ex, &text).iter().all(Option::is_none));
}

#[test]
fn partial_record_reports_missing_fields() {
    let ex = ScoreExtractor::default();
    let rec = ex.extract(&format!("{HEADER}\n57 52 46 44 48"));
    assert!(!rec.is_complete());
    assert_eq!(rec.missing_fields(), vec!["Puntaje Global".to_string()]);
    assert_eq!(rec.to_cells().last().map(String::as_str), Some(""));
}

#[test]
fn custom_subject_table() {
    let settings = ExtractorSettings::with_subjects(vec![
        Subject::named("Física"),
        Subject::named("Química"),
    ])
    .anchor_count(2)
    .global_max(200);
    let ex = ScoreExtractor::new(settings).expect("patterns compile");

    let text = "Física Química\n81 77\nTotal 158/200";
    let rec = ex.extract(text);
    assert_eq!(rec.subject("Física"), Some(81));
    assert_eq!(rec.subject("Química"), Some(77));
    assert_eq!(rec.global_score(), Some(158));
    assert!(ex.extract("Total 158/500").global_score().is_none());
}

#[test]
fn custom_decode_rules() {
    let rules = DecodeRules { min_score: 0, ..DecodeRules::default() };
    let ex = ScoreExtractor::new(ExtractorSettings::default().decode_rules(rules)).expect("compile");
    let text = format!("{HEADER}\n57 00 46 44 48");
    assert_eq!(subjects(&ex, &text)[1], Some(0));
}
