//! Reading spreadsheet exports from disk.

use std::fs;
use std::path::Path;

use apae_ingest::{IngestError, ReadOptions, read_records, resolve_input};
use apae_model::CellValue;
use tempfile::TempDir;

/// Windows-1252 bytes for a system export with a title line.
fn latin1_export() -> Vec<u8> {
    let (bytes, _, _) = encoding_rs::WINDOWS_1252.encode(
        "Relatório de Assistidos;;;;\r\n\
         Nome;Situação;Dt Nasc;Cidade/UF;Obs\r\n\
         Ana Silva;Ativo;01/02/1990;Feliz/RS;\"usa óculos; lê pouco\"\r\n\
         ;;;;\r\n\
         João;Inativo;;São Sebastião do Caí/RS\r\n",
    );
    bytes.into_owned()
}

fn write(dir: &TempDir, name: &str, bytes: &[u8]) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, bytes).unwrap();
    path
}

#[test]
fn reads_latin1_export_with_title_line() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "assistidos.csv", &latin1_export());

    let table = read_records(&path, &ReadOptions::default()).unwrap();

    assert_eq!(table.encoding, "windows-1252");
    assert_eq!(table.headers.skip_rows, 1);
    assert_eq!(table.headers.delimiter, b';');
    assert_eq!(
        table.headers.columns,
        vec!["Nome", "Situação", "Dt Nasc", "Cidade/UF", "Obs"]
    );
    assert_eq!(table.records.len(), 3);

    let first = &table.records[0];
    assert_eq!(first.index(), 0);
    assert_eq!(first.get("Nome"), Some(&CellValue::from("Ana Silva")));
    assert_eq!(first.get("Obs"), Some(&CellValue::from("usa óculos; lê pouco")));

    assert!(table.records[1].first_present(&["Nome"]).is_blank());

    let last = &table.records[2];
    assert_eq!(last.index(), 2);
    assert_eq!(
        last.get("Cidade/UF"),
        Some(&CellValue::from("São Sebastião do Caí/RS"))
    );
    assert_eq!(last.get("Obs"), Some(&CellValue::Empty));
}

#[test]
fn reads_utf8_bom_comma_export() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "export.csv",
        "\u{feff}nome,cpf,cidade\nBia,123,feliz\n".as_bytes(),
    );
    let table = read_records(&path, &ReadOptions::default()).unwrap();
    assert_eq!(table.encoding, "UTF-8");
    assert_eq!(table.headers.columns, vec!["nome", "cpf", "cidade"]);
    assert_eq!(table.records[0].get("cpf"), Some(&CellValue::from("123")));
}

#[test]
fn explicit_delimiter_overrides_detection() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "tab.csv", b"Nome\tEndere\xE7o, n\xBA\nAna\tRua A, 1\n");
    let options = ReadOptions::new().with_delimiter(b'\t');
    let table = read_records(&path, &options).unwrap();
    assert_eq!(table.headers.columns, vec!["Nome", "Endereço, nº"]);
    assert_eq!(
        table.records[0].get("Endereço, nº"),
        Some(&CellValue::from("Rua A, 1"))
    );
}

#[test]
fn missing_file_is_a_hardfail() {
    let dir = TempDir::new().unwrap();
    write(&dir, "outra.csv", b"Nome\nAna\n");
    let result = read_records(&dir.path().join("nada.csv"), &ReadOptions::default());
    match result {
        Err(IngestError::FileNotFound { candidates, .. }) => {
            assert_eq!(candidates.len(), 1);
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn title_only_file_has_no_header() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "titulo.csv", b"Relatorio\n\n");
    let result = read_records(&path, &ReadOptions::default());
    assert!(matches!(result, Err(IngestError::NoHeaderDetected { .. })));
}

#[test]
fn directory_input_resolves_to_its_csv() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "planilha.csv", b"Nome\nAna\n");
    fs::write(dir.path().join("leia-me.txt"), "x").unwrap();
    assert_eq!(resolve_input(dir.path()).unwrap(), path);
    assert_eq!(resolve_input(Path::new(&path)).unwrap(), path);
}
