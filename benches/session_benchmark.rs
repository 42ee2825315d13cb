//! Benchmark for document parsing and session throughput
//!
//! Target: parsing a 1000-question document and playing it through should
//! each stay well under a frame budget

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use quiz_runner_core::config::{parse_document, Navigation, SessionConfig};
use quiz_runner_core::session::QuizSession;

/// Create a realistic question document
fn create_test_document(count: usize) -> String {
    let questions: Vec<serde_json::Value> = (0..count)
        .map(|i| {
            let options: Vec<String> = (0..4).map(|o| format!("Option {} for {}", o, i)).collect();
            serde_json::json!({
                "id": format!("q{}", i),
                "type": "single_choice",
                "question": format!("Question number {}?", i),
                "correct_answer": options[i % 4].clone(),
                "options": options,
                "explanation": if i % 3 == 0 { format!("Explanation {}", i) } else { String::new() },
            })
        })
        .collect();

    serde_json::json!({
        "settings": {"show_progress": true, "shuffle_options": true},
        "questions": questions,
    })
    .to_string()
}

fn benchmark_parsing(c: &mut Criterion) {
    let doc = create_test_document(1000);

    c.bench_function("parse_document_1000", |b| {
        b.iter(|| {
            let set = parse_document(black_box(&doc)).unwrap();
            black_box(set)
        })
    });
}

fn benchmark_session(c: &mut Criterion) {
    let set = parse_document(&create_test_document(1000)).unwrap();

    for navigation in [Navigation::Linear, Navigation::Bidirectional] {
        c.bench_function(&format!("play_through_1000_{}", navigation), |b| {
            let config = SessionConfig::default().with_navigation(navigation).with_seed(7);
            b.iter(|| {
                let mut session = QuizSession::new(set.clone(), config);
                while !session.is_finished() {
                    let option = session.current_view().unwrap().options[0].to_string();
                    session.submit_answer(&option).unwrap();
                    session.advance().unwrap();
                }
                black_box(session.scoreboard())
            })
        });
    }

    // Restart cost: regenerating and reshuffling the display order
    let mut session = QuizSession::new(set.clone(), SessionConfig::default().with_seed(7));
    c.bench_function("restart_1000", |b| {
        b.iter(|| black_box(session.restart()))
    });

    let session = QuizSession::new(set, SessionConfig::default().with_seed(7));
    c.bench_function("render_model", |b| {
        b.iter(|| black_box(session.render()))
    });
}

criterion_group!(benches, benchmark_parsing, benchmark_session);
criterion_main!(benches);
