//! Implementation of the `LOOKUP` procedure (procedure 3) for NFS version 3 protocol
//! as defined in RFC 1813 section 3.3.3.
//!
//! The `LOOKUP` procedure translates a file name into a file handle that can be
//! used for subsequent operations on the file. The client specifies:
//! - The file handle for the directory to search
//! - The filename to look up within that directory
//!
//! On successful return, the server provides:
//! - The file handle of the requested file
//! - The attributes of the requested file
//! - The attributes of the directory (for cache validation)
//!
//! On failure only the directory attributes are returned.

use crate::protocol::rpc::status_procedure;
use crate::protocol::xdr::nfs3::dir::{LOOKUP3args, LOOKUP3resok};
use crate::protocol::xdr::nfs3::{NFSProgram, nfsstat3, post_op_attr};

status_procedure! {
    /// Look up a file name (`NFSPROC3_LOOKUP`)
    Lookup {
        proc: NFSProgram::NFSPROC3_LOOKUP,
        name: "LOOKUP",
        args: LOOKUP3args,
        status: nfsstat3,
        resok: LOOKUP3resok,
        resfail: post_op_attr,
        errors: [
            NFS3ERR_IO, NFS3ERR_NOENT, NFS3ERR_ACCES, NFS3ERR_NOTDIR, NFS3ERR_NAMETOOLONG,
            NFS3ERR_STALE, NFS3ERR_BADHANDLE, NFS3ERR_SERVERFAULT,
        ],
    }
}
