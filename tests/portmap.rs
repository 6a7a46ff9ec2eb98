use std::sync::{Arc, RwLock};

mod support;

use nfs_wire::protocol::nfs::portmap::{
    self, pmapproc_dump, pmapproc_getport, pmapproc_set, pmapproc_unset, PortmapTable,
    SharedPortmapTable,
};
use nfs_wire::protocol::rpc::{CallContext, Dispatcher};
use nfs_wire::xdr::portmap::{mapping, pmaplist, IPPROTO_TCP, IPPROTO_UDP, PROGRAM, VERSION};
use nfs_wire::xdr::rpc::accept_body;
use nfs_wire::xdr::{nfs3, Decodable, Serialize, XdrSize};

use support::{accept_status, call, call_message, parse_reply, test_conn};

const NFS_TCP: mapping =
    mapping { prog: nfs3::PROGRAM, vers: nfs3::VERSION, prot: IPPROTO_TCP, port: 2049 };
const NFS_UDP: mapping =
    mapping { prog: nfs3::PROGRAM, vers: nfs3::VERSION, prot: IPPROTO_UDP, port: 2049 };
const MOUNT_TCP: mapping = mapping { prog: 100005, vers: 3, prot: IPPROTO_TCP, port: 635 };

fn shared_table() -> SharedPortmapTable {
    Arc::new(RwLock::new(PortmapTable::default()))
}

fn ctx(proc: u32) -> CallContext {
    CallContext::new(&test_conn(), proc, &call(PROGRAM, VERSION, proc))
}

/// Calls procedure `proc` of a port mapper serving `table` and returns the
/// decoded result.
async fn call_portmap<A, R>(table: &SharedPortmapTable, proc: u32, args: &A) -> R
where
    A: Serialize + XdrSize,
    R: Decodable,
{
    let dispatcher = Dispatcher::new([portmap::program(table.clone())]);
    let record = call_message(proc, call(PROGRAM, VERSION, proc), args);
    let reply = dispatcher.dispatch(&record, &test_conn()).await.expect("dispatch").expect("reply");
    let (msg, body) = parse_reply(&reply);
    assert_eq!(accept_status(&msg), accept_body::SUCCESS);
    R::decode(&body).expect("decode result")
}

#[test]
fn set_refuses_an_existing_key() {
    let mut table = PortmapTable::default();
    assert!(table.set(&NFS_TCP));
    assert!(!table.set(&mapping { port: 4000, ..NFS_TCP }), "same key, different port");
    assert_eq!(table.getport(nfs3::PROGRAM, nfs3::VERSION, IPPROTO_TCP), 2049);
    assert!(table.set(&NFS_UDP), "another protocol is another key");
}

#[test]
fn unset_removes_every_protocol() {
    let mut table = PortmapTable::default();
    table.set(&NFS_TCP);
    table.set(&NFS_UDP);
    table.set(&MOUNT_TCP);
    assert!(table.unset(nfs3::PROGRAM, nfs3::VERSION));
    assert_eq!(table.dump(), vec![MOUNT_TCP]);
    assert!(!table.unset(nfs3::PROGRAM, nfs3::VERSION));
}

#[test]
fn getport_of_unknown_mapping_is_zero() {
    let table = PortmapTable::default();
    assert_eq!(table.getport(1, 1, IPPROTO_TCP), 0);
}

#[test]
fn dump_is_ordered() {
    let mut table = PortmapTable::default();
    table.set(&MOUNT_TCP);
    table.set(&NFS_UDP);
    table.set(&NFS_TCP);
    assert_eq!(table.dump(), vec![NFS_TCP, NFS_UDP, MOUNT_TCP]);
}

#[tokio::test]
async fn procedures_share_the_table() {
    let table = shared_table();
    assert!(pmapproc_set(table.clone(), ctx(1), NFS_TCP).await.expect("set"));
    assert!(!pmapproc_set(table.clone(), ctx(1), NFS_TCP).await.expect("set"));
    assert_eq!(pmapproc_getport(table.clone(), ctx(3), NFS_TCP).await.expect("getport"), 2049);
    assert_eq!(pmapproc_dump(table.clone(), ctx(4)).await.expect("dump").0, vec![NFS_TCP]);
    assert!(pmapproc_unset(table.clone(), ctx(2), NFS_TCP).await.expect("unset"));
    assert_eq!(pmapproc_getport(table, ctx(3), NFS_TCP).await.expect("getport"), 0);
}

#[tokio::test]
async fn set_getport_dump_over_rpc() {
    let table = shared_table();

    let added: bool = call_portmap(&table, 1, &NFS_TCP).await;
    assert!(added);
    let added: bool = call_portmap(&table, 1, &MOUNT_TCP).await;
    assert!(added);

    let port: u32 = call_portmap(&table, 3, &mapping { port: 0, ..NFS_TCP }).await;
    assert_eq!(port, 2049);
    let port: u32 = call_portmap(&table, 3, &NFS_UDP).await;
    assert_eq!(port, 0);

    let list: pmaplist = call_portmap(&table, 4, &()).await;
    assert_eq!(list.0, vec![NFS_TCP, MOUNT_TCP]);

    let removed: bool = call_portmap(&table, 2, &MOUNT_TCP).await;
    assert!(removed);
    assert_eq!(table.read().expect("table lock").dump(), vec![NFS_TCP]);
}

#[tokio::test]
async fn callit_is_not_provided() {
    let dispatcher = Dispatcher::new([portmap::program(shared_table())]);
    let record = call_message(5, call(PROGRAM, VERSION, 5), &());
    let reply = dispatcher.dispatch(&record, &test_conn()).await.expect("dispatch").expect("reply");
    let (msg, _) = parse_reply(&reply);
    assert_eq!(accept_status(&msg), accept_body::PROC_UNAVAIL);
}
