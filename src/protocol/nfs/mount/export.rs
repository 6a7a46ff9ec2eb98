//! Implementation of the EXPORT procedure (procedure 5) for `MOUNT` version 3 protocol
//! as defined in RFC 1813 Appendix I section I.4.6.
//!
//! EXPORT returns every exported file system together with the groups of
//! clients allowed to mount it. An empty group list means any client may.

use crate::protocol::rpc::plain_procedure;
use crate::protocol::xdr::mount::{exports, MountProgram};

plain_procedure! {
    /// List exported file systems (`MOUNTPROC3_EXPORT`)
    Export {
        proc: MountProgram::MOUNTPROC3_EXPORT,
        name: "EXPORT",
        args: (),
        res: exports,
    }
}
