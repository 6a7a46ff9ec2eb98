//! Implementation of the `NULL` procedure (procedure 0) for NFS version 3 protocol
//! as defined in RFC 1813 section 3.3.0.
//!
//! The `NULL` procedure does no work. Clients use it to check that the server
//! responds and to measure the round-trip time. It takes no arguments and
//! returns no results.

use crate::protocol::rpc::plain_procedure;
use crate::protocol::xdr::nfs3::NFSProgram;

plain_procedure! {
    /// Do nothing (`NFSPROC3_NULL`)
    Null {
        proc: NFSProgram::NFSPROC3_NULL,
        name: "NULL",
        args: (),
        res: (),
    }
}
