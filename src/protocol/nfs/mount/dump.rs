//! Implementation of the DUMP procedure (procedure 2) for MOUNT version 3 protocol
//! as defined in RFC 1813 Appendix I section I.4.3.
//!
//! DUMP returns the server's list of remotely mounted file systems, one
//! `(hostname, directory)` pair per mount. The list is advisory: clients that
//! crash without calling UMNT leave stale entries behind.

use crate::protocol::rpc::plain_procedure;
use crate::protocol::xdr::mount::{mountlist, MountProgram};

plain_procedure! {
    /// List mounted file systems (`MOUNTPROC3_DUMP`)
    Dump {
        proc: MountProgram::MOUNTPROC3_DUMP,
        name: "DUMP",
        args: (),
        res: mountlist,
    }
}
