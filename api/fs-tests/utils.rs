#![allow(dead_code)]

//Some more general testing utilities
use ramfs_api::fs::DirectorySupport;

//Permission bits used throughout the tests
pub const FILE_MODE: u32 = 0o644;
pub const DIR_MODE: u32 = 0o755;

//Collect the names of a directory, in enumeration order
pub fn names<FS: DirectorySupport>(fs: &FS, dir: u64) -> Vec<Vec<u8>> {
    fs.dir_entries(dir)
        .unwrap()
        .iter()
        .map(|e| e.name.clone())
        .collect()
}

//Check a directory's enumeration against the expected names, in order
pub fn assert_names<FS: DirectorySupport>(fs: &FS, dir: u64, expected: &[&str]) {
    let got = names(fs, dir);
    let want: Vec<Vec<u8>> = expected.iter().map(|n| n.as_bytes().to_vec()).collect();
    assert_eq!(got, want);
}
