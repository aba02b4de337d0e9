//! Module containing the types used in this project.
//! Everything here is a plain in-memory value: an inode is a live struct, not
//! a disk record, and a directory's contents are the entry list itself.

/// The path separator byte. Paths are raw byte strings split on this value;
/// no other byte is special.
pub const SEPARATOR: u8 = b'/';

/// Upper bound on the length of a single entry name, in bytes.
/// Matches the usual platform filename limit.
pub const NAME_MAX: usize = 255;

/// Inode number of the root directory.
/// Inodes start counting at one; index 0 exists in the inode table but is
/// never allocated, so that 0 can serve as the "no inode" sentinel (the role
/// a null pointer plays in a pointer-based design).
pub const ROOT_INUM: u64 = 1;

/// The `.` entry name present in every directory.
pub const DOT: &[u8] = b".";

/// The `..` entry name present in every directory.
pub const DOTDOT: &[u8] = b"..";

/// Enum describing file types
/// Currently, either a file `TFile`, a directory `TDir` or a free inode slot
/// `TFree`. The type `TFree` marks a slot in the inode table that holds no
/// object and can be handed out by allocation.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum FType {
    /// Directory file type
    TDir,
    /// Regular file type
    TFile,
    /// Free file type
    TFree,
}
impl Default for FType {
    fn default() -> FType {
        FType::TFree
    }
}

/// A name binding inside one directory.
/// It is these bindings that cause inodes' `nlink` fields to increase.
/// The name is an owned byte string; comparison is byte-wise with no
/// normalization, so two names are equal exactly when their lengths and
/// bytes are.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct DirEntry {
    /// Number of the inode this directory entry points to
    pub inum: u64,
    /// Name of this entry; non-empty, free of separator bytes, and at most
    /// `NAME_MAX` bytes long
    pub name: Vec<u8>,
}

impl DirEntry {
    /// Create a new directory entry, given `inum` and `name`.
    /// Returns `None` if the name is invalid.
    pub fn new(inum: u64, name: &[u8]) -> Option<DirEntry> {
        if !Self::valid_name(name) {
            return None;
        }
        Some(DirEntry {
            inum,
            name: name.to_vec(),
        })
    }

    /// Returns true iff `name` can be bound in a directory: it is non-empty,
    /// contains no separator byte, and does not exceed `NAME_MAX` bytes.
    /// `.` and `..` are ordinary valid names; nothing here treats them
    /// specially.
    pub fn valid_name(name: &[u8]) -> bool {
        !name.is_empty() && name.len() <= NAME_MAX && !name.contains(&SEPARATOR)
    }
}

/// Contents of an inode. An inode owns its contents exclusively: dropping the
/// node drops the file bytes or the entry list with it. Entries reference
/// other inodes by number and own nothing.
#[derive(Debug, PartialEq, Eq)]
pub enum NodeData {
    /// A free slot in the inode table
    Free,
    /// Byte contents of a regular file
    Bytes(Vec<u8>),
    /// Entry list of a directory, in insertion order.
    /// Enumeration through the external interface reflects this order.
    Entries(Vec<DirEntry>),
}

impl Default for NodeData {
    fn default() -> NodeData {
        NodeData::Free
    }
}

/// Metadata record for one filesystem object, independent of any name.
///
/// The mode field stores a full `st_mode` image: the permission bits are kept
/// verbatim and never checked, while the kind bits (`S_IFDIR`/`S_IFREG`) are
/// ORed in by the constructors and mirrored by `ft`.
///
/// Lifetime is governed by two counters: `nlink` counts incoming name edges
/// (for directories including the object's own `.` and every child's `..`),
/// `nopen` counts open handles held by the host bridge. A node is freed
/// exactly when both reach zero; until then the record stays valid even when
/// no path reaches it anymore.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Node {
    /// Registers the file type; `TFree` for an unallocated table slot
    pub ft: FType,
    /// Full `st_mode` image: kind bits plus verbatim permission bits
    pub mode: u32,
    /// Owner id, stored but never interpreted
    pub uid: u32,
    /// Group id, stored but never interpreted
    pub gid: u32,
    /// Number of name edges referencing this node
    pub nlink: u64,
    /// Number of outstanding open handles; only ever non-zero for files
    pub nopen: u64,
    /// Inum of the directory that first linked this node, 0 when unset.
    /// Seeds a new directory's `..`; the resolver never follows it.
    /// The root points at itself.
    pub parent: u64,
    /// Mark used only during whole-tree teardown to break `.`/`..` cycles
    pub visiting: bool,
    /// The owned contents
    pub data: NodeData,
}

impl Node {
    /// Create a fresh regular-file node with empty contents and no links.
    /// The kind bits are ORed into `mode` here, so callers pass permission
    /// bits only.
    pub fn new_file(mode: u32, uid: u32, gid: u32) -> Node {
        Node {
            ft: FType::TFile,
            mode: mode | libc::S_IFREG as u32,
            uid,
            gid,
            data: NodeData::Bytes(Vec::new()),
            ..Node::default()
        }
    }

    /// Create a fresh directory node with an empty entry list and no links.
    /// The caller is responsible for installing `.` and `..` once the node
    /// has been linked into a parent.
    pub fn new_dir(mode: u32, uid: u32, gid: u32) -> Node {
        Node {
            ft: FType::TDir,
            mode: mode | libc::S_IFDIR as u32,
            uid,
            gid,
            data: NodeData::Entries(Vec::new()),
            ..Node::default()
        }
    }

    /// Is this node a directory?
    pub fn is_dir(&self) -> bool {
        self.ft == FType::TDir
    }

    /// Is this node a regular file?
    pub fn is_file(&self) -> bool {
        self.ft == FType::TFile
    }

    /// Byte contents of a regular file; `None` for directories and free
    /// slots.
    pub fn contents_as_ref(&self) -> Option<&[u8]> {
        match &self.data {
            NodeData::Bytes(b) => Some(b),
            _ => None,
        }
    }
}

/// Trait for read access to an inode's attributes, used by attribute queries
/// of the host bridge and by the tests. Solely read access, so implementors
/// do not need setter methods.
pub trait InodeLike {
    ///Get the file type of this inode
    fn get_ft(&self) -> FType;
    ///Get the full mode image, kind bits included
    fn get_mode(&self) -> u32;
    ///Get the owner id
    fn get_uid(&self) -> u32;
    ///Get the group id
    fn get_gid(&self) -> u32;
    ///Get the number of name edges referencing this inode
    fn get_nlink(&self) -> u64;
    ///Get the number of outstanding open handles
    fn get_nopen(&self) -> u64;
    ///Get the size in bytes: the content length for a file, 0 for a
    ///directory
    fn get_size(&self) -> u64;
}

impl InodeLike for Node {
    fn get_ft(&self) -> FType {
        self.ft
    }
    fn get_mode(&self) -> u32 {
        self.mode
    }
    fn get_uid(&self) -> u32 {
        self.uid
    }
    fn get_gid(&self) -> u32 {
        self.gid
    }
    fn get_nlink(&self) -> u64 {
        self.nlink
    }
    fn get_nopen(&self) -> u64 {
        self.nopen
    }
    fn get_size(&self) -> u64 {
        match &self.data {
            NodeData::Bytes(b) => b.len() as u64,
            _ => 0,
        }
    }
}

/// Summary returned by whole-tree teardown.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub struct TeardownReport {
    /// Number of inodes released, orphans included
    pub released: u64,
    /// Number of still-open-file diagnostics emitted
    pub open_files: u64,
}
