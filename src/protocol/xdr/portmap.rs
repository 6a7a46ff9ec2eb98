//! Wire types of the port mapper, PORTMAP version 2 (RFC 1057 Appendix A).

#![allow(non_camel_case_types)]

use num_derive::{FromPrimitive, ToPrimitive};

use super::List;
use super::XdrStruct;

/// One `(program, version, protocol) -> port` registration.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct mapping {
    pub prog: u32,
    pub vers: u32,
    /// `IPPROTO_TCP` or `IPPROTO_UDP`
    pub prot: u32,
    /// Ignored by UNSET and GETPORT
    pub port: u32,
}
XdrStruct!(mapping, prog, vers, prot, port);

/// Result of DUMP: every registered mapping
pub type pmaplist = List<mapping>;

pub const IPPROTO_TCP: u32 = 6;
pub const IPPROTO_UDP: u32 = 17;
pub const PROGRAM: u32 = 100000;
pub const VERSION: u32 = 2;
/// Port the port mapper is found on
pub const PMAP_PORT: u16 = 111;

/// Procedure numbers of PORTMAP version 2
#[allow(clippy::upper_case_acronyms)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum PortmapProgram {
    PMAPPROC_NULL = 0,
    PMAPPROC_SET = 1,
    PMAPPROC_UNSET = 2,
    PMAPPROC_GETPORT = 3,
    PMAPPROC_DUMP = 4,
    /// Not served
    PMAPPROC_CALLIT = 5,
}
