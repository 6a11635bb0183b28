use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn write_sample_db(dir: &Path, file: &str, coverage: [f64; 2]) -> PathBuf {
    let path = dir.join(file);
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE coverage (gene TEXT, transcript TEXT, chromosome TEXT, start INTEGER, stop INTEGER, strand TEXT, coverage REAL);
         CREATE TABLE canonical (chromosome TEXT, start INTEGER, stop INTEGER, strand TEXT, counts INTEGER);
         CREATE TABLE circle (chromosome TEXT, start INTEGER, stop INTEGER, strand TEXT, counts INTEGER);",
    )
    .unwrap();
    for ((start, stop), cov) in [(100, 150), (300, 350)].iter().zip(coverage) {
        conn.execute(
            "INSERT INTO coverage VALUES ('GENE1', 'ENST0001', 'chr1', ?1, ?2, '+', ?3)",
            params![start, stop, cov],
        )
        .unwrap();
    }
    conn.execute("INSERT INTO canonical VALUES ('chr1', 150, 300, '+', 6)", [])
        .unwrap();
    conn.execute("INSERT INTO circle VALUES ('chr1', 100, 350, '+', 2)", [])
        .unwrap();
    path
}

fn splicetrack(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_splicetrack"))
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("run splicetrack")
}

#[test]
fn gene_plot_writes_svg_and_html() {
    let dir = TempDir::new().unwrap();
    write_sample_db(dir.path(), "ctrl.db", [4.0, 2.0]);
    write_sample_db(dir.path(), "treated.sqlite.db", [1.0, 0.0]);

    let out = splicetrack(
        &[
            "-g", "GENE1", "-s", "2", "-n", "-d", "ctrl.db", "treated.sqlite.db",
            "--reduce-canonical", "2", "--repress-open", "--out-dir", "plots", "-q",
        ],
        dir.path(),
    );
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let svg = std::fs::read_to_string(dir.path().join("plots/GENE1 (ENST0001).svg")).unwrap();
    assert!(svg.contains("CTRL"));
    assert!(svg.contains("TREATED"));
    assert!(svg.contains("GENE1 (ENST0001)"));

    let html = std::fs::read_to_string(dir.path().join("plots/GENE1 (ENST0001).html")).unwrap();
    assert!(html.contains(r#"<img src="GENE1 (ENST0001).svg""#));
}

#[test]
fn missing_database_fails_before_writing() {
    let dir = TempDir::new().unwrap();
    let out = splicetrack(&["-t", "ENST0001", "-d", "absent.db", "--repress-open"], dir.path());

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Error: Database: absent.db was not found"));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn missing_selector_is_fatal() {
    let dir = TempDir::new().unwrap();
    write_sample_db(dir.path(), "ctrl.db", [1.0, 1.0]);
    let out = splicetrack(&["-d", "ctrl.db", "--repress-open"], dir.path());

    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Please specify a gene (-g) or transcript (-t)"));
}

#[test]
fn unknown_transcript_is_fatal() {
    let dir = TempDir::new().unwrap();
    write_sample_db(dir.path(), "ctrl.db", [1.0, 1.0]);
    let out = splicetrack(&["-t", "ENST9999", "-d", "ctrl.db", "--repress-open"], dir.path());

    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("ENST9999"));
    assert!(!dir.path().join("ENST9999.svg").exists());
}

#[test]
fn transcript_on_two_chromosomes_is_fatal() {
    let dir = TempDir::new().unwrap();
    let db = write_sample_db(dir.path(), "ctrl.db", [1.0, 1.0]);
    let conn = Connection::open(&db).unwrap();
    conn.execute_batch(
        "INSERT INTO coverage VALUES ('GENE2', 'ENST0002', 'chr1', 100, 150, '+', 1.0);
         INSERT INTO coverage VALUES ('GENE2', 'ENST0002', 'chr7', 300, 350, '+', 1.0);",
    )
    .unwrap();
    drop(conn);

    let out = splicetrack(&["-t", "ENST0002", "-d", "ctrl.db", "--repress-open"], dir.path());

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Error: ENST0002 found on more than one chromosome:"));
    assert!(stderr.contains("chr1"));
    assert!(stderr.contains("chr7"));
    assert!(!dir.path().join("ENST0002.svg").exists());
}

#[test]
fn print_config_emits_sections() {
    let dir = TempDir::new().unwrap();
    let out = splicetrack(&["--print-config"], dir.path());
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("[style]"));
    assert!(stdout.contains("[curves]"));
}
