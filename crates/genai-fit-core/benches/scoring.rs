use criterion::{black_box, criterion_group, criterion_main, Criterion};

use genai_fit_core::bank::QuestionBank;
use genai_fit_core::model::{AnswerShape, Question, ResponseValue};
use genai_fit_core::responses::ResponseStore;
use genai_fit_core::scoring::{ScoringEngine, WiscarScores};

/// Answer every question with the option at `fraction` of its range.
fn answer_all(bank: &QuestionBank, fraction: f64) -> ResponseStore {
    let mut store = ResponseStore::new();
    for q in bank.questions() {
        store.update(&q.id, pick(q, fraction));
    }
    store
}

fn pick(question: &Question, fraction: f64) -> ResponseValue {
    match &question.shape {
        AnswerShape::Choice { options } => {
            let idx = ((options.len() - 1) as f64 * fraction).round() as usize;
            ResponseValue::Choice {
                weight: options[idx].weight,
            }
        }
        AnswerShape::Scale { min, max, .. } => ResponseValue::Scale {
            value: min + ((max - min) as f64 * fraction).round() as i64,
        },
    }
}

fn bench_score(c: &mut Criterion) {
    let bank = QuestionBank::builtin().expect("builtin bank");
    let engine = ScoringEngine::default();
    let mut group = c.benchmark_group("score");

    for (name, fraction) in [("all_min", 0.0), ("midpoint", 0.5), ("all_max", 1.0)] {
        let responses = answer_all(&bank, fraction);
        group.bench_function(name, |b| {
            b.iter(|| engine.score(black_box(&bank), black_box(&responses)))
        });
    }

    let full = answer_all(&bank, 0.5);
    let mut partial = ResponseStore::new();
    for r in full.iter().skip(3) {
        partial.update(&r.question_id, r.value);
    }
    group.bench_function("incomplete", |b| {
        b.iter(|| engine.score(black_box(&bank), black_box(&partial)))
    });

    group.finish();
}

fn bench_overall(c: &mut Criterion) {
    let engine = ScoringEngine::default();
    let wiscar = WiscarScores {
        will: 80,
        interest: 65,
        skill: 40,
        cognitive: 72,
        ability: 55,
        real_world: 90,
    };

    c.bench_function("overall", |b| {
        b.iter(|| engine.overall(black_box(70), black_box(55), black_box(&wiscar)))
    });
}

criterion_group!(benches, bench_score, bench_overall);
criterion_main!(benches);
