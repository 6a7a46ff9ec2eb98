//! Implementation of the UMNTALL procedure (procedure 4) for MOUNT version 3 protocol
//! as defined in RFC 1813 Appendix I section I.4.5.
//!
//! The UMNTALL procedure removes all mount entries for the client from the server's mount list.
//! This is usually called when a client is shutting down or when all mounted file systems
//! need to be unmounted at once.
//!
//! UMNTALL takes no arguments and returns nothing.

use crate::protocol::rpc::plain_procedure;
use crate::protocol::xdr::mount::MountProgram;

plain_procedure! {
    /// Remove all mount list entries of the caller (`MOUNTPROC3_UMNTALL`)
    UmntAll {
        proc: MountProgram::MOUNTPROC3_UMNTALL,
        name: "UMNTALL",
        args: (),
        res: (),
    }
}
