//! Implementation of the UMNT procedure (procedure 3) for MOUNT version 3 protocol
//! as defined in RFC 1813 Appendix I section I.4.4.
//!
//! UMNT removes the mount list entry of the calling client for one directory.
//! It returns nothing, not even an error.

use crate::protocol::rpc::plain_procedure;
use crate::protocol::xdr::mount::{dirpath, MountProgram};

plain_procedure! {
    /// Remove a mount list entry (`MOUNTPROC3_UMNT`)
    Umnt {
        proc: MountProgram::MOUNTPROC3_UMNT,
        name: "UMNT",
        args: dirpath,
        res: (),
    }
}
