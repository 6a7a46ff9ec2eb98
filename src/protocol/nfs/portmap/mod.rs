//! PORTMAP protocol implementation as specified in RFC 1057 A.1 and A.2 sections.
//! https://datatracker.ietf.org/doc/rfc1057/
//!
//! The port mapper keeps a table of `(program, version, protocol) -> port`
//! mappings that services register with SET and clients query with GETPORT.
//! [`program`] builds the procedure table of a port mapper serving a shared
//! [`PortmapTable`]. `PMAPPROC_CALLIT` is not provided and is answered with
//! `PROC_UNAVAIL`.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::protocol::rpc::Program;
use crate::protocol::xdr::portmap::{mapping, PROGRAM, VERSION};

mod dump;
mod get_port;
mod null;
mod set_port;
mod unset_port;

pub use dump::{pmapproc_dump, Dump};
pub use get_port::{pmapproc_getport, Getport};
pub use null::Null;
pub use set_port::{pmapproc_set, Set};
pub use unset_port::{pmapproc_unset, Unset};

/// Key of a registration in the port mapper table
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PortmapKey {
    pub prog: u32,
    pub vers: u32,
    pub prot: u32,
}

impl From<&mapping> for PortmapKey {
    fn from(m: &mapping) -> Self {
        PortmapKey { prog: m.prog, vers: m.vers, prot: m.prot }
    }
}

/// Registered program-to-port mappings.
#[derive(Clone, Debug, Default)]
pub struct PortmapTable {
    pub table: HashMap<PortmapKey, u32>,
}

impl PortmapTable {
    /// Registers `m`. Fails, returning `false`, when `(prog, vers, prot)` is
    /// already registered, whatever its port.
    pub fn set(&mut self, m: &mapping) -> bool {
        let key = PortmapKey::from(m);
        if self.table.contains_key(&key) {
            return false;
        }
        self.table.insert(key, m.port);
        true
    }

    /// Removes every registration of `prog` version `vers`, whatever its
    /// protocol. Returns whether anything was removed.
    pub fn unset(&mut self, prog: u32, vers: u32) -> bool {
        let before = self.table.len();
        self.table.retain(|key, _| key.prog != prog || key.vers != vers);
        self.table.len() != before
    }

    /// Port of `(prog, vers, prot)`, 0 when not registered.
    pub fn getport(&self, prog: u32, vers: u32, prot: u32) -> u32 {
        self.table.get(&PortmapKey { prog, vers, prot }).copied().unwrap_or(0)
    }

    /// Every registration, ordered by program, version and protocol.
    pub fn dump(&self) -> Vec<mapping> {
        let mut entries: Vec<mapping> = self
            .table
            .iter()
            .map(|(key, &port)| mapping { prog: key.prog, vers: key.vers, prot: key.prot, port })
            .collect();
        entries.sort_unstable_by_key(|m| (m.prog, m.vers, m.prot));
        entries
    }
}

/// Shared table of a running port mapper
pub type SharedPortmapTable = Arc<RwLock<PortmapTable>>;

fn read_table(table: &SharedPortmapTable) -> RwLockReadGuard<'_, PortmapTable> {
    table.read().unwrap_or_else(PoisonError::into_inner)
}

fn write_table(table: &SharedPortmapTable) -> RwLockWriteGuard<'_, PortmapTable> {
    table.write().unwrap_or_else(PoisonError::into_inner)
}

/// The PORTMAP version 2 procedure table, serving `table`.
pub fn program(table: SharedPortmapTable) -> Program {
    let set_table = table.clone();
    let unset_table = table.clone();
    let getport_table = table.clone();
    let dump_table = table;
    Program::new(PROGRAM, VERSION)
        .register::<Set, _, _>(move |ctx, m| pmapproc_set(set_table.clone(), ctx, m))
        .register::<Unset, _, _>(move |ctx, m| pmapproc_unset(unset_table.clone(), ctx, m))
        .register::<Getport, _, _>(move |ctx, m| pmapproc_getport(getport_table.clone(), ctx, m))
        .register::<Dump, _, _>(move |ctx, ()| pmapproc_dump(dump_table.clone(), ctx))
}
