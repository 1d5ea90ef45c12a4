use std::path::Path;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use genai_fit_core::bank::{parse_bank_str, validate_bank, QuestionBank, BUILTIN_BANK};
use genai_fit_core::responses::parse_answers_str;

fn bench_bank_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("bank_parsing");

    group.bench_function("builtin", |b| {
        b.iter(|| parse_bank_str(black_box(BUILTIN_BANK), black_box(Path::new("builtin.toml"))))
    });

    let large = generate_bank_toml(50);
    group.bench_function("50_per_section", |b| {
        b.iter(|| parse_bank_str(black_box(&large), black_box(Path::new("bench.toml"))))
    });

    let bank = QuestionBank::builtin().expect("builtin bank");
    group.bench_function("validate_builtin", |b| {
        b.iter(|| validate_bank(black_box(&bank)))
    });

    group.finish();
}

fn bench_answers_parsing(c: &mut Criterion) {
    let bank = QuestionBank::builtin().expect("builtin bank");
    let mut answers = String::from("[answers]\n");
    for q in bank.questions() {
        answers.push_str(&format!("{} = 1\n", q.id));
    }

    c.bench_function("answers_builtin", |b| {
        b.iter(|| parse_answers_str(black_box(&answers), black_box(&bank)))
    });
}

/// A bank with `n` scale questions per section and WISCAR dimension.
fn generate_bank_toml(n: usize) -> String {
    let mut s = String::from("[bank]\nid = \"bench\"\nname = \"Benchmark\"\n");
    for section in ["psychological", "technical"] {
        for i in 0..n {
            s.push_str(&format!(
                r#"
[[questions]]
id = "{section}-{i}"
section = "{section}"
prompt = "Question {i}"
type = "scale"
min = 1
max = 5
"#
            ));
        }
    }
    for dim in ["will", "interest", "skill", "cognitive", "ability", "realWorld"] {
        for i in 0..n {
            s.push_str(&format!(
                r#"
[[questions]]
id = "wis-{dim}-{i}"
section = "wiscar"
dimension = "{dim}"
prompt = "Question {i}"
type = "choice"
options = [
    {{ label = "Low", weight = 0 }},
    {{ label = "High", weight = 3 }},
]
"#
            ));
        }
    }
    s
}

criterion_group!(benches, bench_bank_parsing, bench_answers_parsing);
criterion_main!(benches);
