//! Benchmarks for unnote decoding performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks decode synthetic note buffers of varying page counts.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Creates a synthetic note buffer with the given number of pages, each
/// carrying one bitmap-backed main layer.
fn create_test_note(page_count: usize) -> Vec<u8> {
    let mut data = b"noteSN_FILE_VER_20230101".to_vec();

    let mut block = |content: &[u8]| -> u64 {
        let offset = data.len() as u64;
        data.extend_from_slice(&(content.len() as u32).to_le_bytes());
        data.extend_from_slice(content);
        offset
    };

    let bitmap_bytes = vec![0x5A; 4096];
    let mut footer = String::from("<FILE_FEATURE:24><COVER_0:0>");
    for i in 0..page_count {
        let bitmap = block(&bitmap_bytes);
        let layer = block(
            format!("<LAYERTYPE:NOTE><LAYERNAME:MAINLAYER><LAYERBITMAP:{bitmap}>").as_bytes(),
        );
        let page = block(
            format!(
                "<PAGESTYLE:style_white><MAINLAYER:{layer}>\
                 <LAYERSEQ:MAINLAYER,BGLAYER>\
                 <LAYERINFO:[{{\"layerId\"#\"0\",\"isVisible\"#\"true\"}}]>"
            )
            .as_bytes(),
        );
        footer.push_str(&format!("<PAGE{}:{page}>", i + 1));
    }

    let footer_offset = block(footer.as_bytes());
    data.extend_from_slice(&(footer_offset as u32).to_le_bytes());
    data
}

/// Benchmark signature detection.
fn bench_format_detection(c: &mut Criterion) {
    let note_data = create_test_note(1);
    let non_note_data = b"Not a note file at all, just random text content";

    c.bench_function("detect_valid_note", |b| {
        b.iter(|| unnote::detect_format_from_bytes(black_box(&note_data)).unwrap());
    });

    c.bench_function("detect_non_note", |b| {
        b.iter(|| unnote::detect_format_from_bytes(black_box(non_note_data)).is_err());
    });
}

/// Benchmark full decoding at various page counts.
fn bench_note_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("note_parsing");

    for page_count in [1, 10, 50].iter() {
        let data = create_test_note(*page_count);

        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| unnote::parse_bytes(black_box(&data)).unwrap());
        });

        group.bench_function(format!("{}_pages_sequential", page_count), |b| {
            let options = unnote::ParseOptions::new().sequential();
            b.iter(|| {
                unnote::parse_bytes_with_options(black_box(&data), options.clone()).unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_format_detection, bench_note_parsing);
criterion_main!(benches);
