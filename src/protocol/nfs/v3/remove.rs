//! Implementation of the `REMOVE` procedure (procedure 12) for NFS version 3 protocol
//! as defined in RFC 1813 section 3.3.12.
//!
//! The `REMOVE` procedure removes an entry from a directory. Directories are
//! removed with `RMDIR` instead.
//!
//! Both results carry the weak cache consistency data of the directory.

use crate::protocol::rpc::status_procedure;
use crate::protocol::xdr::nfs3::dir::{REMOVE3args, REMOVE3resok};
use crate::protocol::xdr::nfs3::{NFSProgram, nfsstat3, wcc_data};

status_procedure! {
    /// Remove a file (`NFSPROC3_REMOVE`)
    Remove {
        proc: NFSProgram::NFSPROC3_REMOVE,
        name: "REMOVE",
        args: REMOVE3args,
        status: nfsstat3,
        resok: REMOVE3resok,
        resfail: wcc_data,
        errors: [
            NFS3ERR_NOENT, NFS3ERR_IO, NFS3ERR_ACCES, NFS3ERR_NOTDIR, NFS3ERR_NAMETOOLONG,
            NFS3ERR_ROFS, NFS3ERR_STALE, NFS3ERR_BADHANDLE, NFS3ERR_SERVERFAULT,
        ],
    }
}
