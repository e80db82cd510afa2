//! Response handling benchmark suite.
//!
//! Benchmarks the per-response work done after a message returns:
//! - Classification against the expected kind
//! - Parsing of description payloads of growing size
//!
//! Run with: cargo bench --bench classification
//! Results saved to: target/criterion/

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use serde_json::json;

use dataspace_connector::protocol::{
    ComponentDeserializer, HEADER_PART, JsonLdDeserializer, MessageKind, PAYLOAD_PART,
    ResponseEnvelope, classify,
};

// ============================================================================
// Benchmark Parameters
// ============================================================================

const KEYWORD_COUNTS: &[usize] = &[0, 16, 256];

// ============================================================================
// Fixtures
// ============================================================================

fn envelope(kind: &str) -> ResponseEnvelope {
    let header = json!({
        "@context": { "ids": "https://w3id.org/idsa/core/" },
        "@type": kind,
        "@id": "https://w3id.org/idsa/autogen/descriptionResponseMessage/1",
        "ids:modelVersion": "4.0.0",
    })
    .to_string();

    ResponseEnvelope::new()
        .with_part(HEADER_PART, header)
        .with_part(PAYLOAD_PART, "{}")
}

fn resource(keywords: usize) -> String {
    let keywords: Vec<_> = (0..keywords)
        .map(|i| json!({ "@value": format!("keyword-{i}"), "@language": "en" }))
        .collect();

    json!({
        "@type": "ids:Resource",
        "@id": "https://peer.example/api/offers/1",
        "ids:title": [{ "@value": "Weather data", "@language": "en" }],
        "ids:keyword": keywords,
    })
    .to_string()
}

// ============================================================================
// Benchmark: Classification
// ============================================================================

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");
    let expected = MessageKind::DescriptionResponse;

    for kind in ["ids:DescriptionResponseMessage", "ids:RejectionMessage"] {
        let response = envelope(kind);
        group.bench_with_input(BenchmarkId::new("kind", kind), &response, |b, response| {
            b.iter(|| classify(black_box(response), &expected));
        });
    }

    group.finish();
}

// ============================================================================
// Benchmark: Component Parsing
// ============================================================================

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_component");
    let deserializer = JsonLdDeserializer;

    for &count in KEYWORD_COUNTS {
        let payload = resource(count);
        group.bench_with_input(BenchmarkId::new("keywords", count), &payload, |b, payload| {
            b.iter(|| deserializer.parse(black_box(payload)));
        });
    }

    group.bench_function("unrecognized", |b| {
        b.iter(|| deserializer.parse(black_box(r#"{"@type":"ids:ResourceCatalog"}"#)));
    });

    group.finish();
}

criterion_group!(benches, bench_classify, bench_parse);
criterion_main!(benches);
