//! Implementation of the GETPORT procedure (procedure 3) for port mapper protocol
//! as defined in RFC 1057 A.2 section.
//! https://datatracker.ietf.org/doc/rfc1057/

use std::convert::Infallible;

use tracing::debug;

use super::{read_table, SharedPortmapTable};
use crate::protocol::rpc::{plain_procedure, CallContext};
use crate::protocol::xdr::portmap::{mapping, PortmapProgram};

plain_procedure! {
    /// Look up the port of a program (`PMAPPROC_GETPORT`)
    Getport {
        proc: PortmapProgram::PMAPPROC_GETPORT,
        name: "GETPORT",
        args: mapping,
        res: u32,
    }
}

/// Handles PMAPPROC_GETPORT procedure.
///
/// GETPORT maps an RPC program, version and protocol to a port. The port
/// field of the argument is ignored.
///
/// # Returns
/// The registered port, or 0 when the program is not registered.
pub async fn pmapproc_getport(
    table: SharedPortmapTable,
    ctx: CallContext,
    m: mapping,
) -> Result<u32, Infallible> {
    let port = read_table(&table).getport(m.prog, m.vers, m.prot);
    debug!("pmapproc_getport({:?}, {:?}) = {}", ctx.xid, m, port);
    Ok(port)
}
