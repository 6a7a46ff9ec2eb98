use std::time::Duration;

mod support;

use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::timeout;

use nfs_wire::protocol::rpc::wire::{read_record, record_mark, SocketMessageType};
use nfs_wire::protocol::rpc::{HandlerPanic, SocketMessageHandler, MAX_RPC_RECORD_LENGTH};
use nfs_wire::xdr::nfs3::dir::LOOKUP3args;
use nfs_wire::xdr::nfs3::file::ACCESS3args;
use nfs_wire::xdr::nfs3::{self, diropargs3};
use nfs_wire::xdr::rpc::accept_body;

use support::{
    accept_status, call, call_message, frame, parse_reply, root_fh, test_conn, test_dispatcher,
};

async fn next_reply(msgrecv: &mut UnboundedReceiver<SocketMessageType>) -> Vec<u8> {
    timeout(Duration::from_secs(2), msgrecv.recv())
        .await
        .expect("response timeout")
        .expect("response channel closed")
        .expect("response error")
}

fn null_call(xid: u32) -> Vec<u8> {
    call_message(xid, call(nfs3::PROGRAM, nfs3::VERSION, 0), &())
}

fn lookup_call(xid: u32, name: &str) -> Vec<u8> {
    let args = LOOKUP3args { what: diropargs3 { dir: root_fh(), name: name.into() } };
    call_message(xid, call(nfs3::PROGRAM, nfs3::VERSION, 3), &args)
}

#[tokio::test]
async fn rejects_oversized_rpc_fragment() {
    let (mut handler, mut socksend, _msgrecv) =
        SocketMessageHandler::new(&test_dispatcher(), test_conn());

    let mark = record_mark(MAX_RPC_RECORD_LENGTH + 1, true).expect("record mark");
    socksend.write_all(&mark.to_be_bytes()).await.expect("write fragment header");

    let err = handler.read().await.expect_err("expected oversize error");
    assert!(err.to_string().contains("exceeds max"), "unexpected error: {err:?}");
}

#[tokio::test]
async fn record_limit_counts_every_fragment() {
    let (handler, mut socksend, _msgrecv) =
        SocketMessageHandler::new(&test_dispatcher(), test_conn());
    let mut handler = handler.with_max_record_length(64);

    let mark = record_mark(40, false).expect("record mark");
    socksend.write_all(&mark.to_be_bytes()).await.expect("write mark");
    socksend.write_all(&[0; 40]).await.expect("write fragment");
    handler.read().await.expect("first fragment fits");

    let mark = record_mark(40, true).expect("record mark");
    socksend.write_all(&mark.to_be_bytes()).await.expect("write mark");
    let err = handler.read().await.expect_err("80 bytes exceed the limit");
    assert!(err.to_string().contains("exceeds max"), "unexpected error: {err:?}");
}

#[tokio::test]
async fn accepts_rpc_fragment_under_limit() {
    let (mut handler, mut socksend, mut msgrecv) =
        SocketMessageHandler::new(&test_dispatcher(), test_conn());
    socksend.write_all(&frame(&null_call(7))).await.expect("write record");
    handler.read().await.expect("handler read");

    let response = next_reply(&mut msgrecv).await;
    let (msg, body) = parse_reply(&response);
    assert_eq!(msg.xid, 7);
    assert_eq!(accept_status(&msg), accept_body::SUCCESS);
    assert!(body.is_empty());
}

#[tokio::test]
async fn reassembles_fragments() {
    let (mut handler, mut socksend, mut msgrecv) =
        SocketMessageHandler::new(&test_dispatcher(), test_conn());

    let record = lookup_call(8, "fast");
    let (first, second) = record.split_at(12);
    let mut stream = Vec::new();
    stream.extend(record_mark(first.len(), false).expect("mark").to_be_bytes());
    stream.extend(first);
    stream.extend(record_mark(second.len(), true).expect("mark").to_be_bytes());
    stream.extend(second);
    socksend.write_all(&stream).await.expect("write fragments");

    handler.read().await.expect("first fragment");
    assert!(
        timeout(Duration::from_millis(50), msgrecv.recv()).await.is_err(),
        "nothing is dispatched before the last fragment"
    );
    handler.read().await.expect("last fragment");

    let (msg, body) = parse_reply(&next_reply(&mut msgrecv).await);
    assert_eq!(msg.xid, 8);
    assert_eq!(accept_status(&msg), accept_body::SUCCESS);
    assert_eq!(&body[..4], [0, 0, 0, 0], "NFS3_OK");
}

#[tokio::test]
async fn misaligned_fragment_gets_garbage_args() {
    let (mut handler, mut socksend, mut msgrecv) =
        SocketMessageHandler::new(&test_dispatcher(), test_conn());

    let mut record = null_call(9);
    record.push(0);
    socksend.write_all(&frame(&record)).await.expect("write record");
    handler.read().await.expect("handler read");

    let (msg, _) = parse_reply(&next_reply(&mut msgrecv).await);
    assert_eq!(msg.xid, 9);
    assert_eq!(accept_status(&msg), accept_body::GARBAGE_ARGS);

    // a misaligned record too short to carry an xid is dropped
    socksend.write_all(&frame(&[1, 2])).await.expect("write record");
    handler.read().await.expect("handler read");
    socksend.write_all(&frame(&null_call(10))).await.expect("write record");
    handler.read().await.expect("handler read");
    let (msg, _) = parse_reply(&next_reply(&mut msgrecv).await);
    assert_eq!(msg.xid, 10);
}

#[tokio::test]
async fn replies_leave_in_completion_order() {
    let (mut handler, mut socksend, mut msgrecv) =
        SocketMessageHandler::new(&test_dispatcher(), test_conn());

    socksend.write_all(&frame(&lookup_call(1, "slow"))).await.expect("write slow call");
    socksend.write_all(&frame(&lookup_call(2, "fast"))).await.expect("write fast call");
    handler.read().await.expect("read slow call");
    handler.read().await.expect("read fast call");

    let (first, _) = parse_reply(&next_reply(&mut msgrecv).await);
    let (second, _) = parse_reply(&next_reply(&mut msgrecv).await);
    assert_eq!((first.xid, second.xid), (2, 1));
}

#[tokio::test]
async fn handler_panic_reaches_the_transport() {
    let (mut handler, mut socksend, mut msgrecv) =
        SocketMessageHandler::new(&test_dispatcher(), test_conn());

    let args = ACCESS3args { object: root_fh(), access: 1 };
    let access = call_message(3, call(nfs3::PROGRAM, nfs3::VERSION, 4), &args);
    socksend.write_all(&frame(&access)).await.expect("write access call");
    handler.read().await.expect("read access call");

    let err = timeout(Duration::from_secs(2), msgrecv.recv())
        .await
        .expect("response timeout")
        .expect("response channel closed")
        .expect_err("a panicking handler must not produce a reply");
    let panic = err.downcast_ref::<HandlerPanic>().expect("handler panic");
    assert_eq!(panic.xid, 3);
    assert!(
        panic.message.contains("ACCESS is not allowed to return NFS3ERR_NOTSUPP"),
        "{}",
        panic.message
    );
}

#[tokio::test]
async fn read_record_joins_fragments() {
    let mut stream = Vec::new();
    stream.extend(record_mark(4, false).expect("mark").to_be_bytes());
    stream.extend([1, 2, 3, 4]);
    stream.extend(record_mark(0, false).expect("mark").to_be_bytes());
    stream.extend(record_mark(4, true).expect("mark").to_be_bytes());
    stream.extend([5, 6, 7, 8]);
    let mut src = stream.as_slice();
    let record = read_record(&mut src, 1024).await.expect("read record");
    assert_eq!(record, [1, 2, 3, 4, 5, 6, 7, 8]);
    assert!(src.is_empty());

    let mut truncated: &[u8] = &[0x80, 0, 0, 8, 1, 2];
    assert!(read_record(&mut truncated, 1024).await.is_err());
}
