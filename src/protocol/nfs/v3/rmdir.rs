//! Implementation of the `RMDIR` procedure (procedure 13) for NFS version 3 protocol
//! as defined in RFC 1813 section 3.3.13.
//!
//! The `RMDIR` procedure removes an empty subdirectory from a directory.

use crate::protocol::rpc::status_procedure;
use crate::protocol::xdr::nfs3::dir::{REMOVE3resok, RMDIR3args};
use crate::protocol::xdr::nfs3::{NFSProgram, nfsstat3, wcc_data};

status_procedure! {
    /// Remove a directory (`NFSPROC3_RMDIR`)
    Rmdir {
        proc: NFSProgram::NFSPROC3_RMDIR,
        name: "RMDIR",
        args: RMDIR3args,
        status: nfsstat3,
        resok: REMOVE3resok,
        resfail: wcc_data,
        errors: [
            NFS3ERR_NOENT, NFS3ERR_IO, NFS3ERR_ACCES, NFS3ERR_INVAL, NFS3ERR_EXIST,
            NFS3ERR_NOTDIR, NFS3ERR_NAMETOOLONG, NFS3ERR_ROFS, NFS3ERR_NOTEMPTY, NFS3ERR_STALE,
            NFS3ERR_BADHANDLE, NFS3ERR_NOTSUPP, NFS3ERR_SERVERFAULT,
        ],
    }
}
