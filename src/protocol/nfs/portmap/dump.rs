//! Implementation of the DUMP procedure (procedure 4) for port mapper protocol
//! as defined in RFC 1057 A.2 section.

use std::convert::Infallible;

use tracing::debug;

use super::{read_table, SharedPortmapTable};
use crate::protocol::rpc::{plain_procedure, CallContext};
use crate::protocol::xdr::portmap::{pmaplist, PortmapProgram};

plain_procedure! {
    /// List every mapping (`PMAPPROC_DUMP`)
    Dump {
        proc: PortmapProgram::PMAPPROC_DUMP,
        name: "PMAP DUMP",
        args: (),
        res: pmaplist,
    }
}

/// Implements PMAPPROC_DUMP operation from RFC 1057 (Port Mapper Protocol)
/// Returns all entries from the port mapper's registration table
///
/// # XDR Protocol Notes (RFC 4506)
/// The result is an optional-data list: each mapping is preceded by `TRUE`
/// and the list ends with `FALSE`, so an empty table encodes as a single
/// `FALSE`.
pub async fn pmapproc_dump(table: SharedPortmapTable, ctx: CallContext) -> Result<pmaplist, Infallible> {
    let entries = read_table(&table).dump();
    debug!("pmapproc_dump({:?}) = {} entries", ctx.xid, entries.len());
    Ok(pmaplist::from(entries))
}
