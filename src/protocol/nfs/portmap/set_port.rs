//! Implementation of the SET procedure (procedure 1) for port mapper protocol
//! as defined in RFC 1057 A.2 section.

use std::convert::Infallible;

use tracing::debug;

use super::{write_table, SharedPortmapTable};
use crate::protocol::rpc::{plain_procedure, CallContext};
use crate::protocol::xdr::portmap::{mapping, PortmapProgram};

plain_procedure! {
    /// Register a mapping (`PMAPPROC_SET`)
    Set {
        proc: PortmapProgram::PMAPPROC_SET,
        name: "SET",
        args: mapping,
        res: bool,
    }
}

/// Handles the Portmap SET procedure to register a new port mapping
///
/// # Returns
/// `true` when the mapping was added, `false` when `(prog, vers, prot)` was
/// already registered.
pub async fn pmapproc_set(
    table: SharedPortmapTable,
    ctx: CallContext,
    m: mapping,
) -> Result<bool, Infallible> {
    let added = write_table(&table).set(&m);
    debug!("pmapproc_set({:?}, {:?}) = {}", ctx.xid, m, added);
    Ok(added)
}
