//! Implementation of the NULL procedure (procedure 0) for MOUNT version 3 protocol
//! as defined in RFC 1813 Appendix I section I.4.0.

use crate::protocol::rpc::plain_procedure;
use crate::protocol::xdr::mount::MountProgram;

plain_procedure! {
    /// Do nothing (`MOUNTPROC3_NULL`)
    Null {
        proc: MountProgram::MOUNTPROC3_NULL,
        name: "MOUNT NULL",
        args: (),
        res: (),
    }
}
