//! Implementation of the `LINK` procedure (procedure 15) for NFS version 3 protocol
//! as defined in RFC 1813 section 3.3.15.
//!
//! The `LINK` procedure creates a hard link to an existing file.
//!
//! Hard links can be created only within a single file system, so a
//! cross-device request fails with `NFS3ERR_XDEV`.

use crate::protocol::rpc::status_procedure;
use crate::protocol::xdr::nfs3::file::{LINK3args, LINK3wcc};
use crate::protocol::xdr::nfs3::{NFSProgram, nfsstat3};

status_procedure! {
    /// Create a hard link (`NFSPROC3_LINK`)
    Link {
        proc: NFSProgram::NFSPROC3_LINK,
        name: "LINK",
        args: LINK3args,
        status: nfsstat3,
        resok: LINK3wcc,
        resfail: LINK3wcc,
        errors: [
            NFS3ERR_IO, NFS3ERR_ACCES, NFS3ERR_EXIST, NFS3ERR_XDEV, NFS3ERR_NOTDIR,
            NFS3ERR_INVAL, NFS3ERR_NOSPC, NFS3ERR_ROFS, NFS3ERR_MLINK, NFS3ERR_NAMETOOLONG,
            NFS3ERR_DQUOT, NFS3ERR_STALE, NFS3ERR_BADHANDLE, NFS3ERR_NOTSUPP,
            NFS3ERR_SERVERFAULT,
        ],
    }
}
