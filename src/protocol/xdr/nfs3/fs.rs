//! File system level results: FSSTAT (RFC 1813 section 3.3.18), FSINFO
//! (3.3.19) and PATHCONF (3.3.20).

#![allow(non_camel_case_types)]

use super::*;

// `fsinfo3::properties` bits
/// Hard links are supported
pub const FSF_LINK: u32 = 0x0001;
/// Symbolic links are supported
pub const FSF_SYMLINK: u32 = 0x0002;
/// PATHCONF answers the same for every object of the file system
pub const FSF_HOMOGENEOUS: u32 = 0x0008;
/// SETATTR can set times, to the precision of `time_delta`
pub const FSF_CANSETTIME: u32 = 0x0010;

/// A handle on the file system being queried. FSSTAT, FSINFO and PATHCONF
/// share this wire form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FSSTAT3args {
    pub fsroot: nfs_fh3,
}
XdrStruct!(FSSTAT3args, fsroot);

pub type FSINFO3args = FSSTAT3args;
pub type PATHCONF3args = FSSTAT3args;

/// Static limits and preferences of the server, all sizes in bytes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct fsinfo3 {
    pub obj_attributes: post_op_attr,
    pub rtmax: u32,
    pub rtpref: u32,
    pub rtmult: u32,
    pub wtmax: u32,
    pub wtpref: u32,
    pub wtmult: u32,
    /// READDIR reply size the server prefers
    pub dtpref: u32,
    pub maxfilesize: size3,
    /// Granularity of the times the server keeps
    pub time_delta: nfstime3,
    /// `FSF_*` bits
    pub properties: u32,
}
XdrStruct!(
    fsinfo3,
    obj_attributes,
    rtmax,
    rtpref,
    rtmult,
    wtmax,
    wtpref,
    wtmult,
    dtpref,
    maxfilesize,
    time_delta,
    properties
);

/// Space and file slot counters. The `a*` fields are what the caller may
/// still use after quotas.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FSSTAT3resok {
    pub obj_attributes: post_op_attr,
    pub tbytes: size3,
    pub fbytes: size3,
    pub abytes: size3,
    pub tfiles: size3,
    pub ffiles: size3,
    pub afiles: size3,
    /// Seconds the counters stay valid, 0 when they change all the time
    pub invarsec: u32,
}
XdrStruct!(FSSTAT3resok, obj_attributes, tbytes, fbytes, abytes, tfiles, ffiles, afiles, invarsec);

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PATHCONF3resok {
    pub obj_attributes: post_op_attr,
    pub linkmax: u32,
    pub name_max: u32,
    /// Over-long names fail rather than being truncated
    pub no_trunc: bool,
    /// Only a privileged user may change the owner
    pub chown_restricted: bool,
    pub case_insensitive: bool,
    pub case_preserving: bool,
}
XdrStruct!(
    PATHCONF3resok,
    obj_attributes,
    linkmax,
    name_max,
    no_trunc,
    chown_restricted,
    case_insensitive,
    case_preserving
);
