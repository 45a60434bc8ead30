//! End-to-end pipeline tests: read, tokenize, fill, write.

use std::io::Write;

use simatrix::output::{self, MatrixWriter};
use simatrix::{compute, measures, ComputeOptions, Config, DelimTable, Matrix, StringValue};

fn values(texts: &[&str]) -> Vec<StringValue> {
    texts
        .iter()
        .enumerate()
        .map(|(i, t)| StringValue::from_text(t).with_idx(i).with_label(i as f32))
        .collect()
}

#[test]
fn file_to_matrix_to_file() {
    let mut input = tempfile::NamedTempFile::new().unwrap();
    writeln!(input, "abc\nabd\nxyz").unwrap();

    let strings = simatrix::input::read_lines(input.path()).unwrap();
    assert_eq!(strings.len(), 3);

    let mut matrix = Matrix::new(&strings);
    matrix.alloc();
    let measure = measures::resolve("levenshtein", &Config::default());
    let stats = compute(&mut matrix, &strings, measure.as_ref(), ComputeOptions::default()).unwrap();
    assert_eq!(stats.cells, 6);

    let out_path = tempfile::NamedTempFile::new().unwrap();
    let mut writer = output::create("text", out_path.path().to_str().unwrap()).unwrap();
    writer.write(&matrix).unwrap();
    drop(writer);

    let text = std::fs::read_to_string(out_path.path()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[1], "0 1 3");
    assert_eq!(lines[3], "3 3 0");
}

#[test]
fn tokenized_pipeline_matches_word_edits() {
    let table = DelimTable::parse(" %09");
    let mut strings = values(&["the quick fox", "the\tquick fox", "the lazy dog"]);
    for s in &mut strings {
        s.symbolize(&table);
    }
    assert!(strings.iter().all(StringValue::is_tokens));
    assert_eq!(strings[0].len(), 3);

    let mut matrix = Matrix::new(&strings);
    matrix.alloc();
    let measure = measures::resolve("levenshtein", &Config::default());
    compute(&mut matrix, &strings, measure.as_ref(), ComputeOptions::default()).unwrap();

    // Tab and space tokenize identically, so rows 0 and 1 are equal words.
    assert_eq!(matrix.get(1, 0), 0.0);
    // Two of three words differ.
    assert_eq!(matrix.get(2, 0), 2.0);
}

#[test]
fn sharded_blocks_tile_the_full_matrix() {
    let strings = values(&["aa", "ab", "ba", "bb", "cc"]);
    let measure = measures::resolve("levenshtein", &Config::default());

    let mut full = Matrix::new(&strings);
    full.alloc();
    compute(&mut full, &strings, measure.as_ref(), ComputeOptions::default()).unwrap();

    for block in 0..2 {
        let mut shard = Matrix::new(&strings);
        shard.split(&format!("2:{block}")).unwrap();
        shard.alloc();
        compute(&mut shard, &strings, measure.as_ref(), ComputeOptions::default()).unwrap();

        let (x, y, triangular) = shard.active_ranges();
        assert!(!triangular);
        for xi in x.start..x.end {
            for yi in y.start..y.end {
                assert_eq!(shard.get(xi, yi), full.get(xi, yi), "cell ({xi}, {yi})");
            }
        }
    }
}

#[test]
fn unknown_names_fall_back_instead_of_failing() {
    let strings = values(&["abc", "abd"]);
    let mut matrix = Matrix::new(&strings);
    matrix.alloc();

    let measure = measures::resolve("definitely_not_a_measure", &Config::default());
    assert_eq!(measure.name(), measures::DEFAULT_MEASURE);
    compute(&mut matrix, &strings, measure.as_ref(), ComputeOptions::default()).unwrap();

    let out = tempfile::NamedTempFile::new().unwrap();
    let writer = output::create("no_such_format", out.path().to_str().unwrap());
    assert!(writer.is_ok());
}

#[test]
fn libsvm_output_covers_active_rows() {
    let strings = values(&["abc", "abd", "xyz"]);
    let mut matrix = Matrix::new(&strings);
    matrix.set_x_range("1:3");
    matrix.set_y_range("0:3");
    matrix.alloc();
    let measure = measures::resolve("jaccard", &Config::default());
    compute(&mut matrix, &strings, measure.as_ref(), ComputeOptions::default()).unwrap();

    let out = tempfile::NamedTempFile::new().unwrap();
    let mut writer = output::create("libsvm", out.path().to_str().unwrap()).unwrap();
    writer.write(&matrix).unwrap();
    drop(writer);

    let text = std::fs::read_to_string(out.path()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("1 1:"));
    assert!(lines[1].starts_with("2 1:"));
    assert_eq!(lines[0].split_whitespace().count(), 4);
}
