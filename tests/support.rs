#![allow(dead_code)]

use std::sync::{Arc, RwLock};
use std::time::Duration;

use nfs_wire::protocol::nfs::error::ResultExt;
use nfs_wire::protocol::nfs::portmap::PortmapTable;
use nfs_wire::protocol::nfs::{mount, portmap, v3};
use nfs_wire::protocol::rpc::wire::{parse_record_mark, record_mark};
use nfs_wire::protocol::rpc::{CallContext, ConnectionContext, Dispatcher, Program, Reply};
use nfs_wire::xdr::mount::{exportnode, exports, mountres3_ok, mountstat3};
use nfs_wire::xdr::nfs3::dir::{LOOKUP3args, LOOKUP3resok};
use nfs_wire::xdr::nfs3::file::{ACCESS3args, GETATTR3args, GETATTR3resok};
use nfs_wire::xdr::nfs3::{fattr3, ftype3, nfs_fh3, nfsstat3, nfstime3};
use nfs_wire::xdr::rpc::{
    accept_body, auth_flavor, call_body, opaque_auth, reply_body, rpc_body, rpc_msg,
};
use nfs_wire::xdr::{deserialize, Encodable, List, Serialize, XdrSize};

pub const ROOT_HANDLE: &[u8] = b"/tmp";
pub const EXPORT_PATH: &str = "/export";

pub fn root_fh() -> nfs_fh3 {
    nfs_fh3 { data: ROOT_HANDLE.to_vec() }
}

/// A regular file: `-rw-r--r--`, 46 bytes.
pub fn sample_fattr3() -> fattr3 {
    fattr3 {
        ftype: ftype3::NF3REG,
        mode: 0o644,
        nlink: 1,
        uid: 1000,
        gid: 1000,
        size: 46,
        used: 4096,
        fsid: 0x0803,
        fileid: 42,
        atime: nfstime3 { seconds: 1_700_000_000, nseconds: 1 },
        mtime: nfstime3 { seconds: 1_700_000_100, nseconds: 2 },
        ctime: nfstime3 { seconds: 1_700_000_200, nseconds: 3 },
        ..Default::default()
    }
}

pub fn test_conn() -> ConnectionContext {
    ConnectionContext { local_port: 2049, client_addr: "127.0.0.1:1234".to_string() }
}

pub fn call(prog: u32, vers: u32, proc: u32) -> call_body {
    call_body {
        rpcvers: 2,
        prog,
        vers,
        proc,
        cred: opaque_auth::default(),
        verf: opaque_auth::default(),
    }
}

/// A call record without its record mark.
pub fn call_message<A: Serialize + XdrSize>(xid: u32, call: call_body, args: &A) -> Vec<u8> {
    let mut buf = rpc_msg { xid, body: rpc_body::CALL(call) }.encode().expect("encode call");
    buf.extend(args.encode().expect("encode args"));
    buf
}

/// Prefixes `record` with the mark of a single last fragment.
pub fn frame(record: &[u8]) -> Vec<u8> {
    let mut buf = record_mark(record.len(), true).expect("record mark").to_be_bytes().to_vec();
    buf.extend_from_slice(record);
    buf
}

/// Splits a marked reply record into its message header and the bytes after it.
pub fn parse_reply(record: &[u8]) -> (rpc_msg, Vec<u8>) {
    let mark = u32::from_be_bytes(record[..4].try_into().expect("record mark"));
    let (is_last, length) = parse_record_mark(mark);
    assert!(is_last, "replies are sent as a single fragment");
    assert_eq!(length, record.len() - 4, "record mark disagrees with the record length");
    let mut src = &record[4..];
    let msg = deserialize::<rpc_msg>(&mut src).expect("decode reply header");
    (msg, src.to_vec())
}

/// The accept status of an accepted reply.
pub fn accept_status(msg: &rpc_msg) -> accept_body {
    match &msg.body {
        rpc_body::REPLY(reply_body::MSG_ACCEPTED(accepted)) => {
            assert_eq!(accepted.verf.flavor, auth_flavor::AUTH_NULL as u32);
            accepted.reply_data.clone()
        }
        other => panic!("expected an accepted reply, got {other:?}"),
    }
}

async fn getattr(_ctx: CallContext, args: GETATTR3args) -> Result<Reply<v3::Getattr>, nfsstat3> {
    if args.object != root_fh() {
        return Err(nfsstat3::NFS3ERR_STALE);
    }
    Ok(Reply::ok(GETATTR3resok { obj_attributes: sample_fattr3() }))
}

/// Looks names up in a directory holding `fast` and `slow`; `slow` takes a
/// while to answer.
async fn lookup(_ctx: CallContext, args: LOOKUP3args) -> Result<Reply<v3::Lookup>, nfsstat3> {
    if args.what.dir != root_fh() {
        return Err(nfsstat3::NFS3ERR_STALE);
    }
    let fileid = match args.what.name.as_ref() {
        b"fast" => 1,
        b"slow" => {
            tokio::time::sleep(Duration::from_millis(200)).await;
            2
        }
        b"denied" => {
            let denied = std::io::Error::from(std::io::ErrorKind::PermissionDenied);
            return Err::<Reply<v3::Lookup>, _>(denied)
                .or_nfs_error_for::<v3::Lookup>();
        }
        _ => return Ok(Reply::fail(nfsstat3::NFS3ERR_NOENT, Some(sample_fattr3()))),
    };
    Ok(Reply::ok(LOOKUP3resok {
        object: nfs_fh3 { data: vec![fileid] },
        obj_attributes: Some(fattr3 { fileid: fileid as u64, ..sample_fattr3() }),
        dir_attributes: None,
    }))
}

/// Violates the ACCESS allow-list.
async fn access(_ctx: CallContext, _args: ACCESS3args) -> Result<Reply<v3::Access>, nfsstat3> {
    Err(nfsstat3::NFS3ERR_NOTSUPP)
}

async fn mnt(
    _ctx: CallContext,
    path: nfs_wire::xdr::mount::dirpath,
) -> Result<Reply<mount::Mnt>, mountstat3> {
    if path.as_ref() != EXPORT_PATH.as_bytes() {
        return Err(mountstat3::MNT3ERR_NOENT);
    }
    Ok(Reply::ok(mountres3_ok {
        fhandle: root_fh(),
        auth_flavors: vec![auth_flavor::AUTH_NULL as u32, auth_flavor::AUTH_UNIX as u32],
    }))
}

async fn export(_ctx: CallContext, _args: ()) -> Result<exports, std::convert::Infallible> {
    Ok(List(vec![exportnode { ex_dir: EXPORT_PATH.into(), ex_groups: List::default() }]))
}

pub fn nfs_program() -> Program {
    v3::program()
        .register::<v3::Getattr, _, _>(getattr)
        .register::<v3::Lookup, _, _>(lookup)
        .register::<v3::Access, _, _>(access)
}

pub fn mount_program() -> Program {
    mount::program().register::<mount::Mnt, _, _>(mnt).register::<mount::Export, _, _>(export)
}

/// NFS, MOUNT and PORTMAP served together.
pub fn test_dispatcher() -> Dispatcher {
    let table = Arc::new(RwLock::new(PortmapTable::default()));
    Dispatcher::new([nfs_program(), mount_program(), portmap::program(table)])
}
