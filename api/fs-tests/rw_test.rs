use super::FSName;
use ramfs_api::fs::{FileSysSupport, InodeRWSupport, InodeSupport, PathSupport};
use ramfs_api::types::{FType, InodeLike};

#[path = "utils.rs"]
mod utils;

#[test]
fn error_cases() {
    let mut my_fs = FSName::newfs().unwrap();
    let f = my_fs.i_alloc(FType::TFile, utils::FILE_MODE, 0, 0).unwrap();
    let mut buf = [0; 8];

    //Reads and writes may start within the file or exactly at its end
    assert!(my_fs.i_read(f, &mut buf, 1).is_err());
    assert_eq!(my_fs.i_read(f, &mut buf, 0).unwrap(), 0);
    assert!(my_fs.i_write(f, b"x", 1).is_err());
    assert_eq!(my_fs.i_write(f, b"x", 0).unwrap(), 1);
    assert_eq!(my_fs.i_read(f, &mut buf, 1).unwrap(), 0);

    //Directories carry no byte contents
    let root = my_fs.root_ino();
    assert!(my_fs.i_read(root, &mut buf, 0).is_err());
    assert!(my_fs.i_write(root, b"x", 0).is_err());
    assert!(my_fs.i_trunc(root, 0).is_err());

    //Free slots are not reachable at all
    assert!(my_fs.i_read(9, &mut buf, 0).is_err());
    assert!(my_fs.i_open(9).is_err());
}

#[test]
fn read_write() {
    let mut my_fs = FSName::newfs().unwrap();
    let f = my_fs.mknod(b"/f", utils::FILE_MODE, 0, 0).unwrap();

    assert_eq!(my_fs.i_write(f, b"hello world", 0).unwrap(), 11);
    assert_eq!(my_fs.i_get(f).unwrap().get_size(), 11);

    let mut buf = [0; 5];
    assert_eq!(my_fs.i_read(f, &mut buf, 6).unwrap(), 5);
    assert_eq!(&buf, b"world");

    //Reads clamp at the end of the file
    let mut big = [0; 32];
    assert_eq!(my_fs.i_read(f, &mut big, 6).unwrap(), 5);
    assert_eq!(&big[..5], b"world");

    //Overwrite in place, then extend past the end
    assert_eq!(my_fs.i_write(f, b"W", 6).unwrap(), 1);
    assert_eq!(my_fs.i_write(f, b"lings", 8).unwrap(), 5);
    assert_eq!(my_fs.i_get(f).unwrap().get_size(), 13);
    let mut all = [0; 13];
    assert_eq!(my_fs.i_read(f, &mut all, 0).unwrap(), 13);
    assert_eq!(&all, b"hello Wolings");
}

#[test]
fn truncate() {
    let mut my_fs = FSName::newfs().unwrap();
    let f = my_fs.mknod(b"/f", utils::FILE_MODE, 0, 0).unwrap();
    my_fs.i_write(f, b"0123456789", 0).unwrap();

    //Shrinking discards the tail
    my_fs.i_trunc(f, 4).unwrap();
    assert_eq!(my_fs.i_get(f).unwrap().get_size(), 4);
    let mut buf = [0xaa; 8];
    assert_eq!(my_fs.i_read(f, &mut buf, 0).unwrap(), 4);
    assert_eq!(&buf[..4], b"0123");

    //Growing fills with zeroes
    my_fs.i_trunc(f, 8).unwrap();
    assert_eq!(my_fs.i_get(f).unwrap().get_size(), 8);
    assert_eq!(my_fs.i_read(f, &mut buf, 0).unwrap(), 8);
    assert_eq!(&buf, b"0123\0\0\0\0");

    my_fs.i_trunc(f, 0).unwrap();
    assert_eq!(my_fs.i_get(f).unwrap().get_size(), 0);
}

#[test]
fn open_close() {
    let mut my_fs = FSName::newfs().unwrap();
    let f = my_fs.mknod(b"/f", utils::FILE_MODE, 0, 0).unwrap();

    assert!(my_fs.i_open(my_fs.root_ino()).is_err()); //directories have no open count

    my_fs.i_open(f).unwrap();
    my_fs.i_open(f).unwrap();
    assert_eq!(my_fs.i_get(f).unwrap().get_nopen(), 2);
    my_fs.i_close(f).unwrap();
    my_fs.i_close(f).unwrap();
    assert!(my_fs.i_close(f).is_err()); //not open anymore
    assert!(my_fs.i_get(f).is_ok()); //still bound at /f

    //A nameless file dies with its last handle
    let g = my_fs.i_alloc(FType::TFile, utils::FILE_MODE, 0, 0).unwrap();
    my_fs.i_open(g).unwrap();
    my_fs.i_close(g).unwrap();
    assert!(my_fs.i_get(g).is_err());
}
