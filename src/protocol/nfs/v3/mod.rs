//! NFSv3 (Network File System version 3) procedures as specified in RFC 1813.
//!
//! Every procedure of the protocol is a marker type carrying its number, its
//! argument and result types and, for the 21 procedures whose result starts
//! with an `nfsstat3`, the failure statuses it may return:
//!
//! 1. NULL - Do nothing (ping the server)
//! 2. GETATTR - Get file attributes
//! 3. SETATTR - Set file attributes
//! 4. LOOKUP - Look up file name
//! 5. ACCESS - Check access permission
//! 6. READLINK - Read from symbolic link
//! 7. READ - Read from file
//! 8. WRITE - Write to file
//! 9. CREATE - Create a file
//! 10. MKDIR - Create a directory
//! 11. SYMLINK - Create a symbolic link
//! 12. MKNOD - Create a special device
//! 13. REMOVE - Remove a file
//! 14. RMDIR - Remove a directory
//! 15. RENAME - Rename a file or directory
//! 16. LINK - Create a hard link
//! 17. READDIR - Read from directory
//! 18. READDIRPLUS - Extended read from directory
//! 19. FSSTAT - Get dynamic file system information
//! 20. FSINFO - Get static file system information
//! 21. PATHCONF - Retrieve POSIX information
//! 22. COMMIT - Commit cached data on a server to stable storage
//!
//! Handlers are attached with [`Program::register`]:
//!
//! ```ignore
//! let nfs = v3::program()
//!     .register::<v3::Getattr, _, _>(|ctx, args| async move { fs.getattr(ctx, args).await });
//! ```

use crate::protocol::rpc::Program;
use crate::protocol::xdr::nfs3::{PROGRAM, VERSION};

mod access;
mod commit;
mod create;
mod fsinfo;
mod fsstat;
mod getattr;
mod link;
mod lookup;
mod mkdir;
mod mknod;
mod null;
mod pathconf;
mod read;
mod readdir;
mod readdirplus;
mod readlink;
mod remove;
mod rename;
mod rmdir;
mod setattr;
mod symlink;
mod write;

pub use access::Access;
pub use commit::Commit;
pub use create::Create;
pub use fsinfo::Fsinfo;
pub use fsstat::Fsstat;
pub use getattr::Getattr;
pub use link::Link;
pub use lookup::Lookup;
pub use mkdir::Mkdir;
pub use mknod::Mknod;
pub use null::Null;
pub use pathconf::Pathconf;
pub use read::Read;
pub use readdir::Readdir;
pub use readdirplus::Readdirplus;
pub use readlink::Readlink;
pub use remove::Remove;
pub use rename::Rename;
pub use rmdir::Rmdir;
pub use setattr::Setattr;
pub use symlink::Symlink;
pub use write::Write;

/// An empty procedure table for NFS version 3.
pub fn program() -> Program {
    Program::new(PROGRAM, VERSION)
}
