//! Command-line tests: exit status, output file and layout selection.

use std::fs;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;
use zip::ZipArchive;

const CSV: &str = "id,lottery_number,first_name,last_name,Elementary\n\
                   1,Offered,Ada,Lovelace,Hill\n\
                   2,WL 0001,Alan,Turing,Park\n";

fn run(input: &Path, output: &Path, layout: Option<&str>) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_lottery-slides"));
    cmd.arg(input)
        .arg(output)
        .env_remove("LOTTERY_SLIDES_LAYOUT")
        .env_remove("RUST_LOG");
    if let Some(layout) = layout {
        cmd.env("LOTTERY_SLIDES_LAYOUT", layout);
    }
    cmd.output().unwrap()
}

fn setup(csv: &str) -> (TempDir, PathBuf, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("lottery.csv");
    fs::write(&input, csv).unwrap();
    let output = dir.path().join("deck.pptx");
    (dir, input, output)
}

fn read_slide(path: &Path, n: usize) -> String {
    let bytes = fs::read(path).unwrap();
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut content = String::new();
    archive
        .by_name(&format!("ppt/slides/slide{}.xml", n))
        .unwrap()
        .read_to_string(&mut content)
        .unwrap();
    content
}

#[test]
fn test_success_exits_zero_and_writes_table_deck() {
    let (_dir, input, output) = setup(CSV);

    let result = run(&input, &output, None);
    assert!(result.status.success(), "{}", String::from_utf8_lossy(&result.stderr));
    assert!(output.exists());

    let body = read_slide(&output, 2);
    assert!(body.contains("<a:tbl>"));
    assert!(!body.contains("<a:buChar"));
}

#[test]
fn test_layout_env_selects_bullets() {
    let (_dir, input, output) = setup(CSV);

    let result = run(&input, &output, Some("bullets"));
    assert!(result.status.success(), "{}", String::from_utf8_lossy(&result.stderr));

    let body = read_slide(&output, 2);
    assert!(body.contains("<a:buChar"));
    assert!(body.contains("<a:t>Ada Lovelace - Hill</a:t>"));
}

#[test]
fn test_missing_input_exits_non_zero() {
    let (dir, _input, output) = setup(CSV);

    let result = run(&dir.path().join("absent.csv"), &output, None);
    assert!(!result.status.success());
    assert!(!output.exists());
    assert!(String::from_utf8_lossy(&result.stderr).contains("absent.csv"));
}

#[test]
fn test_malformed_csv_exits_non_zero() {
    let (_dir, input, output) = setup("id,lottery_number,first_name,last_name,Elementary\n1,Offered,Ada\n");

    let result = run(&input, &output, None);
    assert!(!result.status.success());
    assert!(!output.exists());
}

#[test]
fn test_bad_layout_exits_non_zero() {
    let (_dir, input, output) = setup(CSV);

    let result = run(&input, &output, Some("slideshow"));
    assert!(!result.status.success());
    assert!(!output.exists());
    assert!(String::from_utf8_lossy(&result.stderr).contains("slideshow"));
}

#[test]
fn test_extra_argument_rejected() {
    let (dir, input, output) = setup(CSV);

    let result = Command::new(env!("CARGO_BIN_EXE_lottery-slides"))
        .arg(&input)
        .arg(&output)
        .arg(dir.path().join("extra"))
        .output()
        .unwrap();
    assert!(!result.status.success());
    assert!(!output.exists());
}
