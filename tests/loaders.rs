//! Loader chains backed by files, memory tables and gzip tarballs.

use flate2::write::GzEncoder;
use flate2::Compression;
use gridstead::config::TAR_RECORD_SIZE;
use gridstead::{
    decode_json, file_loader, memory_loader, tarball_loader, FileLoader, GridsteadError, MemoryLoader, Resource,
    ResourceManager, ResourceRegistry, TarballLoader,
};
use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::rc::Rc;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[derive(Debug, PartialEq)]
struct Text {
    source: &'static str,
    body: String,
}

impl Resource for Text {
    type Context = ();
}

#[derive(Debug, Deserialize, PartialEq)]
struct Palette {
    name: String,
    colors: Vec<u32>,
}

impl Resource for Palette {
    type Context = ();
}

fn tar_entry(name: &str, contents: &[u8]) -> Vec<u8> {
    let mut record = vec![0u8; TAR_RECORD_SIZE];
    record[..name.len()].copy_from_slice(name.as_bytes());
    record[124..135].copy_from_slice(format!("{:011o}", contents.len()).as_bytes());
    record[156] = b'0';
    record[257..263].copy_from_slice(b"ustar\0");

    record.extend_from_slice(contents);
    let padded = contents.len().div_ceil(TAR_RECORD_SIZE) * TAR_RECORD_SIZE;
    record.resize(TAR_RECORD_SIZE + padded, 0);
    record
}

fn gzip(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut tar = Vec::new();
    for (name, contents) in entries {
        tar.extend(tar_entry(name, contents));
    }
    tar.resize(tar.len() + TAR_RECORD_SIZE * 2, 0);

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&tar).unwrap();
    encoder.finish().unwrap()
}

#[test]
fn test_tarball_from_disk() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let archive = dir.path().join("assets.tar.gz");
    fs::write(
        &archive,
        gzip(&[
            ("palettes/dawn.json", br#"{ "name": "dawn", "colors": [1, 2, 3] }"#),
            ("readme.txt", b"not a palette"),
        ]),
    )
    .unwrap();

    let tarball = Rc::new(TarballLoader::open(&archive).unwrap());
    assert_eq!(tarball.entries().count(), 2);

    let mut manager = ResourceManager::new();
    manager.add_registry(ResourceRegistry::<Palette>::with_loader(tarball_loader::<Palette, _>(
        Rc::clone(&tarball),
        |bytes, _| decode_json(bytes),
    )));

    let palette = manager.load::<Palette>("palettes/dawn.json");
    assert_eq!(palette.name, "dawn");
    assert_eq!(palette.colors, vec![1, 2, 3]);

    // Present in the archive but not valid JSON
    assert!(matches!(
        manager.try_load_with::<Palette>("readme.txt", &()),
        Err(GridsteadError::ResourceNotFound { .. })
    ));
    assert!(!manager.loaded::<Palette>("readme.txt"));
}

#[test]
fn test_missing_tarball_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        TarballLoader::open(dir.path().join("missing.tar.gz")),
        Err(GridsteadError::Io(_))
    ));
}

#[test]
fn test_file_search_order() {
    init_logging();
    let mods = tempfile::tempdir().unwrap();
    let base = tempfile::tempdir().unwrap();
    fs::write(base.path().join("title.txt"), "base title").unwrap();
    fs::write(base.path().join("credits.txt"), "base credits").unwrap();
    fs::write(mods.path().join("title.txt"), "modded title").unwrap();

    let mut files = FileLoader::new();
    files.add_search_directory(mods.path());
    files.add_search_directory(base.path());

    let mut registry = ResourceRegistry::<Text>::with_loader(file_loader::<Text, _>(Rc::new(files), |path, _| {
        Ok(Text {
            source: "file",
            body: fs::read_to_string(path)?,
        })
    }));

    assert_eq!(registry.load("title.txt").body, "modded title");
    assert_eq!(registry.load("credits.txt").body, "base credits");
    assert!(registry.try_load_with("unknown.txt", &()).is_err());
}

#[test]
fn test_chain_falls_through_in_order() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("shared.txt"), "from disk").unwrap();
    fs::write(dir.path().join("disk_only.txt"), "disk only").unwrap();

    let mut memory = MemoryLoader::new();
    memory.add_memory("shared.txt", &b"from memory"[..]);
    memory.add_memory("memory_only.txt", b"memory only".to_vec());

    let mut files = FileLoader::new();
    files.add_search_directory(dir.path());

    let mut registry = ResourceRegistry::<Text>::new();
    registry.add_loader(memory_loader::<Text, _>(Rc::new(memory), |bytes, _| {
        Ok(Text {
            source: "memory",
            body: String::from_utf8_lossy(bytes).into_owned(),
        })
    }));
    registry.add_loader(file_loader::<Text, _>(Rc::new(files), |path, _| {
        Ok(Text {
            source: "file",
            body: fs::read_to_string(path)?,
        })
    }));
    registry.add_path_loader(|path| {
        (path.extension()?.to_str()? == "gen").then(|| {
            Box::new(Text {
                source: "generated",
                body: path.display().to_string(),
            })
        })
    });

    assert_eq!(registry.load("shared.txt").source, "memory");
    assert_eq!(registry.load("memory_only.txt").body, "memory only");
    assert_eq!(registry.load("disk_only.txt").source, "file");
    assert_eq!(registry.load("noise.gen").source, "generated");
    assert!(registry.try_load_with("nothing.bin", &()).is_err());
    assert_eq!(registry.len(), 4);
}
