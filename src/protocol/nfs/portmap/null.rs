//! Implementation of the NULL procedure (procedure 0) for port mapper protocol
//! as defined in RFC 1057 A.2 section.

use crate::protocol::rpc::plain_procedure;
use crate::protocol::xdr::portmap::PortmapProgram;

plain_procedure! {
    /// Do nothing (`PMAPPROC_NULL`)
    Null {
        proc: PortmapProgram::PMAPPROC_NULL,
        name: "PMAP NULL",
        args: (),
        res: (),
    }
}
