// benches/extract.rs
use criterion::{criterion_group, criterion_main, Criterion, black_box};

use icfes_scores::ScoreExtractor;

const HEADER: &str = "Lectura Crítica Matemáticas Sociales y Ciudadanas Ciencias Naturales Inglés";

fn sample_page() -> String {
    let mut page = String::from("REPÚBLICA DE COLOMBIA\nRESULTADOS EXAMEN DE ESTADO SABER 11\n");
    for i in 0..40 {
        page.push_str(&format!("Texto de relleno {i} de la página de resultados\n"));
    }
    page.push_str("Puntaje global\n245/500\n");
    page.push_str(HEADER);
    page.push_str("\n57100 52100 46100 44100 48100\n");
    for i in 0..40 {
        page.push_str(&format!("Percentil {i} nacional\n"));
    }
    page
}

fn bench_extract(c: &mut Criterion) {
    let page = sample_page();
    let noise = page.replace(HEADER, "Resultados por prueba");
    let ex = ScoreExtractor::default();

    c.bench_function("extract_page", |b| {
        b.iter(|| {
            let rec = ex.extract(black_box(&page));
            black_box(rec.is_complete())
        })
    });

    c.bench_function("extract_no_header", |b| {
        b.iter(|| {
            let rec = ex.extract(black_box(&noise));
            black_box(rec.is_empty())
        })
    });

    c.bench_function("extractor_new", |b| {
        b.iter(|| black_box(ScoreExtractor::default()))
    });
}

criterion_group!(benches, bench_extract);
criterion_main!(benches);
