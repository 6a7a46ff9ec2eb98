//! Implementation of the `MKNOD` procedure (procedure 11) for NFS version 3 protocol
//! as defined in RFC 1813 section 3.3.11.
//!
//! The `MKNOD` procedure creates a special file: a character or block device,
//! a socket or a FIFO. Device files carry their major and minor numbers.
//!
//! Requests for any other file type fail with `NFS3ERR_BADTYPE`.

use crate::protocol::rpc::status_procedure;
use crate::protocol::xdr::nfs3::dir::{MKNOD3args, diropres3ok};
use crate::protocol::xdr::nfs3::{NFSProgram, nfsstat3, wcc_data};

status_procedure! {
    /// Create a special device (`NFSPROC3_MKNOD`)
    Mknod {
        proc: NFSProgram::NFSPROC3_MKNOD,
        name: "MKNOD",
        args: MKNOD3args,
        status: nfsstat3,
        resok: diropres3ok,
        resfail: wcc_data,
        errors: [
            NFS3ERR_IO, NFS3ERR_ACCES, NFS3ERR_EXIST, NFS3ERR_NOTDIR, NFS3ERR_NOSPC,
            NFS3ERR_ROFS, NFS3ERR_NAMETOOLONG, NFS3ERR_DQUOT, NFS3ERR_STALE, NFS3ERR_BADHANDLE,
            NFS3ERR_NOTSUPP, NFS3ERR_SERVERFAULT, NFS3ERR_BADTYPE,
        ],
    }
}
