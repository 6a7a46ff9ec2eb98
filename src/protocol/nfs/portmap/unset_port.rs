//! Implementation of the UNSET procedure (procedure 2) for port mapper protocol
//! as defined in RFC 1057 A.2 section.

use std::convert::Infallible;

use tracing::debug;

use super::{write_table, SharedPortmapTable};
use crate::protocol::rpc::{plain_procedure, CallContext};
use crate::protocol::xdr::portmap::{mapping, PortmapProgram};

plain_procedure! {
    /// Remove the mappings of a program version (`PMAPPROC_UNSET`)
    Unset {
        proc: PortmapProgram::PMAPPROC_UNSET,
        name: "UNSET",
        args: mapping,
        res: bool,
    }
}

/// Handles the Portmap UNSET procedure.
///
/// The protocol and port of the argument are ignored: every protocol
/// registered for `(prog, vers)` is removed.
///
/// # Returns
/// `true` if at least one mapping was removed.
pub async fn pmapproc_unset(
    table: SharedPortmapTable,
    ctx: CallContext,
    m: mapping,
) -> Result<bool, Infallible> {
    let removed = write_table(&table).unset(m.prog, m.vers);
    debug!("pmapproc_unset({:?}, {:?}) = {}", ctx.xid, m, removed);
    Ok(removed)
}
