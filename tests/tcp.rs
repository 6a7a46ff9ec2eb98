use std::sync::{Arc, RwLock};

mod support;

use nfs_wire::protocol::nfs::portmap::{self, PortmapTable};
use nfs_wire::protocol::nfs::{mount, v3};
use nfs_wire::protocol::rpc::{Dispatcher, RpcClient, RpcError};
use nfs_wire::tcp::{RpcTcp, RpcTcpListener};
use nfs_wire::xdr::nfs3::dir::LOOKUP3args;
use nfs_wire::xdr::nfs3::file::GETATTR3args;
use nfs_wire::xdr::nfs3::{self, diropargs3, nfsstat3};
use nfs_wire::xdr::portmap::{mapping, IPPROTO_TCP};
use nfs_wire::xdr::rpc::auth_unix;

use support::{mount_program, nfs_program, root_fh, sample_fattr3, EXPORT_PATH};

/// Serves NFS, MOUNT and PORTMAP on a fresh loopback port and returns it.
async fn serve() -> u16 {
    let table = Arc::new(RwLock::new(PortmapTable::default()));
    let dispatcher = Dispatcher::new([nfs_program(), mount_program(), portmap::program(table)]);
    let listener = RpcTcpListener::bind("127.0.0.1:0", dispatcher).await.expect("bind");
    let port = listener.get_listen_port();
    assert_ne!(port, 0);
    tokio::spawn(async move { listener.handle_forever().await });
    port
}

async fn connect(port: u16) -> RpcClient<tokio::net::TcpStream> {
    RpcClient::connect(("127.0.0.1", port)).await.expect("connect")
}

#[tokio::test]
async fn null_and_getattr_over_tcp() {
    let port = serve().await;
    let mut client = connect(port).await;

    client.null(nfs3::PROGRAM, nfs3::VERSION).await.expect("NULL");

    let args = GETATTR3args { object: root_fh() };
    let res = client.call::<v3::Getattr>(nfs3::PROGRAM, nfs3::VERSION, &args).await.expect("call");
    assert_eq!(res.resok().map(|r| r.obj_attributes), Some(sample_fattr3()));

    let args = LOOKUP3args { what: diropargs3 { dir: root_fh(), name: "nothing".into() } };
    let res = client.call::<v3::Lookup>(nfs3::PROGRAM, nfs3::VERSION, &args).await.expect("call");
    assert_eq!(res.status(), nfsstat3::NFS3ERR_NOENT);
}

#[tokio::test]
async fn mount_then_getattr_on_one_connection() {
    let port = serve().await;
    let cred =
        auth_unix { machinename: b"test".to_vec(), uid: 1000, gid: 1000, ..Default::default() };
    let mut client = connect(port).await.with_auth_unix(&cred).expect("credentials");

    let res = client
        .call::<mount::Mnt>(nfs_wire::xdr::mount::PROGRAM, 3, &EXPORT_PATH.into())
        .await
        .expect("MNT");
    let fhandle = res.into_result().expect("export is mounted").fhandle;

    let args = GETATTR3args { object: fhandle };
    let res = client.call::<v3::Getattr>(nfs3::PROGRAM, nfs3::VERSION, &args).await.expect("call");
    assert!(res.is_ok());
}

#[tokio::test]
async fn portmap_over_tcp() {
    let port = serve().await;
    let mut client = connect(port).await;
    let (prog, vers) = (nfs_wire::xdr::portmap::PROGRAM, nfs_wire::xdr::portmap::VERSION);

    let nfs = mapping { prog: nfs3::PROGRAM, vers: nfs3::VERSION, prot: IPPROTO_TCP, port: 2049 };
    assert!(client.call::<portmap::Set>(prog, vers, &nfs).await.expect("SET"));
    assert!(!client.call::<portmap::Set>(prog, vers, &nfs).await.expect("second SET"));

    let query = mapping { port: 0, ..nfs };
    assert_eq!(client.call::<portmap::Getport>(prog, vers, &query).await.expect("GETPORT"), 2049);

    let list = client.call::<portmap::Dump>(prog, vers, &()).await.expect("DUMP");
    assert_eq!(list.0, vec![nfs]);

    assert!(client.call::<portmap::Unset>(prog, vers, &query).await.expect("UNSET"));
    let list = client.call::<portmap::Dump>(prog, vers, &()).await.expect("DUMP");
    assert!(list.0.is_empty());
}

#[tokio::test]
async fn rpc_errors_reach_the_client() {
    let port = serve().await;
    let mut client = connect(port).await;

    let err = client.null(123_456, 1).await.expect_err("unknown program");
    assert_eq!(err.downcast_ref::<RpcError>(), Some(&RpcError::ProgramUnavailable));

    let err = client.null(nfs3::PROGRAM, 2).await.expect_err("unknown version");
    assert_eq!(
        err.downcast_ref::<RpcError>(),
        Some(&RpcError::ProgramMismatch { low: 3, high: 3 })
    );

    let args = nfs_wire::xdr::nfs3::file::READ3args::default();
    let err = client
        .call::<v3::Read>(nfs3::PROGRAM, nfs3::VERSION, &args)
        .await
        .expect_err("READ is not served");
    assert_eq!(err.downcast_ref::<RpcError>(), Some(&RpcError::ProcedureUnavailable));

    // the connection survives every rejection
    client.null(nfs3::PROGRAM, nfs3::VERSION).await.expect("NULL");
}

#[tokio::test]
async fn oversized_record_closes_the_connection() {
    let table = Arc::new(RwLock::new(PortmapTable::default()));
    let listener = RpcTcpListener::bind("127.0.0.1:0", Dispatcher::new([portmap::program(table)]))
        .await
        .expect("bind")
        .with_max_record_length(32);
    let port = listener.get_listen_port();
    tokio::spawn(async move { listener.handle_forever().await });

    let mut client = connect(port).await;
    let mapping = mapping::default();
    let prog = nfs_wire::xdr::portmap::PROGRAM;
    assert!(client.call::<portmap::Set>(prog, 2, &mapping).await.is_err());
}
