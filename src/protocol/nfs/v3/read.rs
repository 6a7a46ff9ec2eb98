//! Implementation of the `READ` procedure (procedure 6) for NFS version 3 protocol
//! as defined in RFC 1813 section 3.3.6.
//!
//! The `READ` procedure reads data from a regular file. The client specifies:
//! - The file handle of the file to read
//! - The offset in the file to start reading
//! - The amount of data to read
//!
//! On successful return, the server provides:
//! - The file attributes after the read
//! - The actual number of bytes read
//! - An EOF flag indicating whether the read reached the end of file
//! - The data read from the file

use crate::protocol::rpc::status_procedure;
use crate::protocol::xdr::nfs3::file::{READ3args, READ3resok};
use crate::protocol::xdr::nfs3::{NFSProgram, nfsstat3, post_op_attr};

status_procedure! {
    /// Read from a file (`NFSPROC3_READ`)
    Read {
        proc: NFSProgram::NFSPROC3_READ,
        name: "READ",
        args: READ3args,
        status: nfsstat3,
        resok: READ3resok,
        resfail: post_op_attr,
        errors: [
            NFS3ERR_IO, NFS3ERR_NXIO, NFS3ERR_ACCES, NFS3ERR_INVAL, NFS3ERR_STALE,
            NFS3ERR_BADHANDLE, NFS3ERR_SERVERFAULT,
        ],
    }
}
