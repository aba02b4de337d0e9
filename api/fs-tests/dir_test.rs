use super::FSName;
use ramfs_api::fs::{DirectorySupport, FileSysSupport, InodeSupport};
use ramfs_api::types::{FType, InodeLike, ROOT_INUM};

#[path = "utils.rs"]
mod utils;

#[test]
fn root_entries() {
    let my_fs = FSName::newfs().unwrap();
    utils::assert_names(&my_fs, ROOT_INUM, &[".", ".."]);
    assert_eq!(my_fs.dirlookup(ROOT_INUM, b".").unwrap(), ROOT_INUM);
    assert_eq!(my_fs.dirlookup(ROOT_INUM, b"..").unwrap(), ROOT_INUM);
    assert!(my_fs.dirlookup(ROOT_INUM, b"x").is_err());
}

#[test]
fn link_unlink_order() {
    let mut my_fs = FSName::newfs().unwrap();
    let f = my_fs.i_alloc(FType::TFile, utils::FILE_MODE, 0, 0).unwrap();
    let g = my_fs.i_alloc(FType::TFile, utils::FILE_MODE, 0, 0).unwrap();
    let h = my_fs.i_alloc(FType::TFile, utils::FILE_MODE, 0, 0).unwrap();

    my_fs.dirlink(ROOT_INUM, b"f", f).unwrap();
    my_fs.dirlink(ROOT_INUM, b"g", g).unwrap();
    my_fs.dirlink(ROOT_INUM, b"h", h).unwrap();
    utils::assert_names(&my_fs, ROOT_INUM, &[".", "..", "f", "g", "h"]);
    assert_eq!(my_fs.dirlookup(ROOT_INUM, b"g").unwrap(), g);

    //Detaching from the middle keeps the rest in order
    assert_eq!(my_fs.dirunlink(ROOT_INUM, b"g").unwrap(), g);
    utils::assert_names(&my_fs, ROOT_INUM, &[".", "..", "f", "h"]);
    assert!(my_fs.dirunlink(ROOT_INUM, b"g").is_err());

    //The primitives leave link counts alone
    assert_eq!(my_fs.i_get(f).unwrap().get_nlink(), 0);
}

#[test]
fn append_is_unchecked() {
    //The list primitive does not enforce uniqueness; lookup and detach both
    //operate on the first match
    let mut my_fs = FSName::newfs().unwrap();
    let f = my_fs.i_alloc(FType::TFile, utils::FILE_MODE, 0, 0).unwrap();
    let g = my_fs.i_alloc(FType::TFile, utils::FILE_MODE, 0, 0).unwrap();

    my_fs.dirlink(ROOT_INUM, b"x", f).unwrap();
    my_fs.dirlink(ROOT_INUM, b"x", g).unwrap();
    assert_eq!(my_fs.dirlookup(ROOT_INUM, b"x").unwrap(), f);
    assert_eq!(my_fs.dirunlink(ROOT_INUM, b"x").unwrap(), f);
    assert_eq!(my_fs.dirlookup(ROOT_INUM, b"x").unwrap(), g);
}

#[test]
fn non_directories_and_bad_names() {
    let mut my_fs = FSName::newfs().unwrap();
    let f = my_fs.i_alloc(FType::TFile, utils::FILE_MODE, 0, 0).unwrap();

    assert!(my_fs.dirlookup(f, b"x").is_err());
    assert!(my_fs.dirlink(f, b"x", ROOT_INUM).is_err());
    assert!(my_fs.dir_entries(f).is_err());

    //Invalid names are rejected at the primitive level
    assert!(my_fs.dirlink(ROOT_INUM, b"", f).is_err());
    assert!(my_fs.dirlink(ROOT_INUM, b"a/b", f).is_err());
    //Raw bytes are fine; there is no normalization to trip over
    assert!(my_fs.dirlink(ROOT_INUM, &[0xff, 0x2e], f).is_ok());
}
