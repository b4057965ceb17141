use assert_cmd::Command;
use std::path::PathBuf;

fn fixture(name: &str, contents: &[u8]) -> PathBuf {
    let path = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

fn elf64_exec() -> Vec<u8> {
    let mut bytes = vec![0u8; 64];
    bytes[..16].copy_from_slice(&[
        0x7f, 0x45, 0x4c, 0x46, 0x02, 0x01, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00,
    ]);
    bytes[16] = 2;
    bytes[24..32].copy_from_slice(&0x40_0078u64.to_le_bytes());
    bytes
}

fn elfhdr() -> Command {
    Command::cargo_bin("elfhdr").unwrap()
}

#[test]
fn prints_text_report() {
    let path = fixture("exec64", &elf64_exec());
    let assert = elfhdr().arg(&path).assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();

    assert_eq!(
        stdout,
        "ELF Header:\n\
         \x20 Magic:   7f 45 4c 46 02 01 01 00 00 00 00 00 00 00 00 00\n\
         \x20 Class:                             ELF64\n\
         \x20 Data:                              2's complement, little endian\n\
         \x20 Version:                           1 (current)\n\
         \x20 OS/ABI:                            UNIX - System V\n\
         \x20 ABI Version:                       0\n\
         \x20 Type:                              EXEC (Executable file)\n\
         \x20 Entry point address:               0x400078\n"
    );
}

#[test]
fn prints_big_endian_elf32() {
    let mut bytes = vec![0u8; 52];
    bytes[..9].copy_from_slice(&[0x7f, b'E', b'L', b'F', 1, 2, 1, 3, 0]);
    bytes[16..18].copy_from_slice(&[0x00, 0x02]);
    bytes[24..28].copy_from_slice(&[0x00, 0x01, 0x00, 0xb0]);
    let path = fixture("exec32be", &bytes);

    let assert = elfhdr().arg(&path).assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();

    assert!(stdout.contains("2's complement, big endian\n"));
    assert!(stdout.contains("UNIX - Linux\n"));
    assert!(stdout.contains("EXEC (Executable file)\n"));
    assert!(stdout.contains("Entry point address:               0x100b0\n"));
}

#[test]
fn prints_json_report() {
    let path = fixture("exec64-json", &elf64_exec());
    let assert = elfhdr()
        .args(["--format", "json"])
        .arg(&path)
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();

    assert!(stdout.contains(r#""class": "ELF64""#));
    assert!(stdout.contains(r#""type": "EXEC (Executable file)""#));
    assert!(stdout.contains(r#""entry_point": "0x400078""#));
}

#[test]
fn rejects_non_elf_with_98() {
    let path = fixture("zeros", &[0u8; 64]);
    let assert = elfhdr().arg(&path).assert().code(98);
    let output = assert.get_output();

    assert!(output.stdout.is_empty());
    assert_eq!(
        String::from_utf8(output.stderr.clone()).unwrap(),
        "Error: Not an ELF file\n"
    );
}

#[test]
fn strict_magic_rejects_permuted_signature() {
    let mut bytes = elf64_exec();
    bytes[..4].copy_from_slice(b"FLE\x7f");
    let path = fixture("permuted", &bytes);

    elfhdr().arg(&path).assert().success();
    elfhdr().arg("--strict-magic").arg(&path).assert().code(98);
}

#[test]
fn missing_file_exits_98() {
    let assert = elfhdr().arg("/nonexistent/elfhdr/a.out").assert().code(98);
    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();

    assert!(stderr.starts_with("Error: Can't read file /nonexistent/elfhdr/a.out"));
}

#[test]
fn missing_argument_exits_98() {
    elfhdr().assert().code(98);
}
