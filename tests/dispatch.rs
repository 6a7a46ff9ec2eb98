mod support;

use nfs_wire::protocol::nfs::v3;
use nfs_wire::protocol::rpc::{CallContext, Dispatcher, Reply};
use nfs_wire::xdr::mount::{self, mountres3_ok, mountstat3};
use nfs_wire::xdr::nfs3::dir::{LOOKUP3args, LOOKUP3resok};
use nfs_wire::xdr::nfs3::file::{GETATTR3args, GETATTR3resok};
use nfs_wire::xdr::nfs3::fs::{FSSTAT3args, FSSTAT3resok};
use nfs_wire::xdr::nfs3::{self, diropargs3, nfs_fh3, nfsstat3};
use nfs_wire::xdr::rpc::{
    accept_body, auth_unix, mismatch_info, opaque_auth, rejected_reply, reply_body, rpc_body,
    rpc_msg, SuccessHeader,
};
use nfs_wire::xdr::{Decodable, Encodable};

use support::{
    accept_status, call, call_message, parse_reply, root_fh, test_conn, test_dispatcher,
};

async fn dispatch(dispatcher: &Dispatcher, record: &[u8]) -> Option<Vec<u8>> {
    dispatcher.dispatch(record, &test_conn()).await.expect("dispatch")
}

async fn answer(record: &[u8]) -> (rpc_msg, Vec<u8>) {
    let reply = dispatch(&test_dispatcher(), record).await.expect("a reply");
    parse_reply(&reply)
}

#[tokio::test]
async fn wrong_rpc_version_is_denied() {
    let mut header = call(nfs3::PROGRAM, nfs3::VERSION, 0);
    header.rpcvers = 1;
    let (msg, body) = answer(&call_message(7, header, &())).await;
    assert_eq!(msg.xid, 7);
    assert_eq!(
        msg.body,
        rpc_body::REPLY(reply_body::MSG_DENIED(rejected_reply::RPC_MISMATCH(mismatch_info {
            low: 2,
            high: 2
        })))
    );
    assert!(body.is_empty());
}

#[tokio::test]
async fn unknown_program_is_unavailable() {
    let (msg, body) = answer(&call_message(8, call(999_999, 1, 1), &())).await;
    assert_eq!(accept_status(&msg), accept_body::PROG_UNAVAIL);
    assert!(body.is_empty());
}

#[tokio::test]
async fn unknown_version_reports_the_served_range() {
    let reply = dispatch(&test_dispatcher(), &call_message(9, call(nfs3::PROGRAM, 99, 1), &()))
        .await
        .expect("a reply");
    assert_eq!(reply.len(), 4 + 32);
    let (msg, _) = parse_reply(&reply);
    assert_eq!(accept_status(&msg), accept_body::PROG_MISMATCH(mismatch_info { low: 3, high: 3 }));
}

#[tokio::test]
async fn procedure_zero_is_answered_for_every_program() {
    for (prog, vers) in [
        (nfs3::PROGRAM, nfs3::VERSION),
        (mount::PROGRAM, mount::VERSION),
        (nfs_wire::xdr::portmap::PROGRAM, nfs_wire::xdr::portmap::VERSION),
    ] {
        let reply = dispatch(&test_dispatcher(), &call_message(10, call(prog, vers, 0), &()))
            .await
            .expect("a reply");
        assert_eq!(reply.len(), 4 + SuccessHeader::XDR_SIZE);
        let (msg, body) = parse_reply(&reply);
        assert_eq!(msg.xid, 10);
        assert_eq!(accept_status(&msg), accept_body::SUCCESS);
        assert!(body.is_empty());
    }
}

#[tokio::test]
async fn unregistered_procedure_is_unavailable() {
    let (msg, _) = answer(&call_message(11, call(nfs3::PROGRAM, nfs3::VERSION, 77), &())).await;
    assert_eq!(accept_status(&msg), accept_body::PROC_UNAVAIL);

    // READ is a valid NFS procedure, but no handler was registered for it
    let (msg, _) = answer(&call_message(12, call(nfs3::PROGRAM, nfs3::VERSION, 6), &())).await;
    assert_eq!(accept_status(&msg), accept_body::PROC_UNAVAIL);
}

#[tokio::test]
async fn undecodable_arguments_are_garbage() {
    // a 65-byte handle is over the limit
    let mut args = 65_u32.to_be_bytes().to_vec();
    args.extend([0; 68]);
    let mut record = call_message(13, call(nfs3::PROGRAM, nfs3::VERSION, 1), &());
    record.extend(args);
    let (msg, body) = answer(&record).await;
    assert_eq!(msg.xid, 13);
    assert_eq!(accept_status(&msg), accept_body::GARBAGE_ARGS);
    assert!(body.is_empty());

    // truncated arguments
    let record = call_message(14, call(nfs3::PROGRAM, nfs3::VERSION, 1), &4_u32);
    let (msg, _) = answer(&record).await;
    assert_eq!(accept_status(&msg), accept_body::GARBAGE_ARGS);
}

#[tokio::test]
async fn reply_messages_are_not_answered() {
    let record = rpc_msg::from(SuccessHeader { xid: 15 }).encode().expect("encode");
    assert!(dispatch(&test_dispatcher(), &record).await.is_none());
}

#[tokio::test]
async fn undecodable_header_is_dropped() {
    assert!(dispatch(&test_dispatcher(), &[0, 0, 0, 1, 0, 0]).await.is_none());
}

#[tokio::test]
async fn getattr_success() {
    let args = GETATTR3args { object: root_fh() };
    let reply = dispatch(
        &test_dispatcher(),
        &call_message(16, call(nfs3::PROGRAM, nfs3::VERSION, 1), &args),
    )
    .await
    .expect("a reply");
    assert_eq!(reply.len(), 4 + 24 + 88);
    let (msg, body) = parse_reply(&reply);
    assert_eq!(accept_status(&msg), accept_body::SUCCESS);
    let res = Reply::<v3::Getattr>::decode(&body).expect("decode GETATTR3res");
    assert_eq!(res.resok(), Some(&GETATTR3resok { obj_attributes: support::sample_fattr3() }));
}

#[tokio::test]
async fn handler_error_becomes_a_status_reply() {
    let args = GETATTR3args { object: nfs_fh3 { data: b"/elsewhere".to_vec() } };
    let (msg, body) =
        answer(&call_message(17, call(nfs3::PROGRAM, nfs3::VERSION, 1), &args)).await;
    assert_eq!(accept_status(&msg), accept_body::SUCCESS);
    assert_eq!(body, 70_u32.to_be_bytes());
}

#[tokio::test]
async fn lookup_statuses() {
    let lookup = |name: &str| LOOKUP3args { what: diropargs3 { dir: root_fh(), name: name.into() } };

    let (_, body) =
        answer(&call_message(18, call(nfs3::PROGRAM, nfs3::VERSION, 3), &lookup("fast"))).await;
    let res = Reply::<v3::Lookup>::decode(&body).expect("decode");
    let resok: &LOOKUP3resok = res.resok().expect("lookup succeeds");
    assert_eq!(resok.object, nfs_fh3 { data: vec![1] });

    let (_, body) =
        answer(&call_message(19, call(nfs3::PROGRAM, nfs3::VERSION, 3), &lookup("denied"))).await;
    let res = Reply::<v3::Lookup>::decode(&body).expect("decode");
    assert_eq!(res.status(), nfsstat3::NFS3ERR_ACCES);
    assert_eq!(res.resfail(), Some(&None));

    let (_, body) =
        answer(&call_message(20, call(nfs3::PROGRAM, nfs3::VERSION, 3), &lookup("missing"))).await;
    let res = Reply::<v3::Lookup>::decode(&body).expect("decode");
    assert_eq!(res.status(), nfsstat3::NFS3ERR_NOENT);
    assert!(res.resfail().expect("failure body").is_some(), "directory attributes are kept");
}

#[tokio::test]
async fn mount_export() {
    let path: mount::dirpath = support::EXPORT_PATH.into();
    let (_, body) =
        answer(&call_message(21, call(mount::PROGRAM, mount::VERSION, 1), &path)).await;
    let res = Reply::<nfs_wire::protocol::nfs::mount::Mnt>::decode(&body).expect("decode");
    assert_eq!(
        res.resok(),
        Some(&mountres3_ok { fhandle: root_fh(), auth_flavors: vec![0, 1] })
    );

    let path: mount::dirpath = "/nowhere".into();
    let (_, body) =
        answer(&call_message(22, call(mount::PROGRAM, mount::VERSION, 1), &path)).await;
    assert_eq!(body, (mountstat3::MNT3ERR_NOENT as u32).to_be_bytes());

    let (_, body) = answer(&call_message(23, call(mount::PROGRAM, mount::VERSION, 5), &())).await;
    let exports = mount::exports::decode(&body).expect("decode exports");
    assert_eq!(exports.0.len(), 1);
    assert_eq!(exports.0[0].ex_dir.as_ref(), support::EXPORT_PATH.as_bytes());
}

#[tokio::test]
async fn handlers_see_unix_credentials() {
    async fn fsstat(
        ctx: CallContext,
        _args: FSSTAT3args,
    ) -> Result<Reply<v3::Fsstat>, nfsstat3> {
        let auth = ctx.auth.ok_or(nfsstat3::NFS3ERR_SERVERFAULT)?;
        Ok(Reply::ok(FSSTAT3resok {
            tfiles: auth.uid as u64,
            ffiles: auth.gid as u64,
            ..Default::default()
        }))
    }
    let dispatcher = Dispatcher::new([v3::program().register::<v3::Fsstat, _, _>(fsstat)]);

    let cred = auth_unix {
        stamp: 1,
        machinename: b"client".to_vec(),
        uid: 501,
        gid: 20,
        gids: vec![20, 12],
    };
    let mut header = call(nfs3::PROGRAM, nfs3::VERSION, 18);
    header.cred = opaque_auth::unix(&cred).expect("encode credentials");
    let reply = dispatch(&dispatcher, &call_message(24, header.clone(), &FSSTAT3args::default()))
        .await
        .expect("a reply");
    let (_, body) = parse_reply(&reply);
    let res = Reply::<v3::Fsstat>::decode(&body).expect("decode");
    let resok = res.resok().expect("credentials were passed");
    assert_eq!((resok.tfiles, resok.ffiles), (501, 20));

    header.cred = opaque_auth::default();
    let reply = dispatch(&dispatcher, &call_message(25, header, &FSSTAT3args::default()))
        .await
        .expect("a reply");
    let (_, body) = parse_reply(&reply);
    let res = Reply::<v3::Fsstat>::decode(&body).expect("decode");
    assert_eq!(res.status(), nfsstat3::NFS3ERR_SERVERFAULT);
}

#[test]
fn dispatcher_reports_version_range() {
    let dispatcher = test_dispatcher();
    assert_eq!(dispatcher.versions(nfs3::PROGRAM), Some((3, 3)));
    assert_eq!(dispatcher.versions(1), None);
}

#[tokio::test]
async fn unknown_auth_flavors_are_served_anonymously() {
    for flavor in [5, 390_004] {
        let mut header = call(nfs3::PROGRAM, nfs3::VERSION, 0);
        header.cred = opaque_auth { flavor, body: vec![1, 2, 3, 4] };
        let (msg, body) = answer(&call_message(26, header, &())).await;
        assert_eq!(msg.xid, 26);
        assert_eq!(accept_status(&msg), accept_body::SUCCESS, "flavor {flavor}");
        assert!(body.is_empty());
    }

    // the same call as raw words, with empty credentials of flavor 5
    let words: [u32; 10] = [5, 0, 2, nfs3::PROGRAM, nfs3::VERSION, 0, 5, 0, 0, 0];
    let record: Vec<u8> = words.iter().flat_map(|w| w.to_be_bytes()).collect();
    let (msg, _) = answer(&record).await;
    assert_eq!(msg.xid, 5);
    assert_eq!(accept_status(&msg), accept_body::SUCCESS);
}

#[tokio::test]
async fn unknown_flavor_carries_no_credentials() {
    async fn fsstat(ctx: CallContext, _args: FSSTAT3args) -> Result<Reply<v3::Fsstat>, nfsstat3> {
        assert!(ctx.auth.is_none());
        Ok(Reply::ok(FSSTAT3resok::default()))
    }
    let dispatcher = Dispatcher::new([v3::program().register::<v3::Fsstat, _, _>(fsstat)]);

    let cred = auth_unix { uid: 501, ..Default::default() };
    let mut header = call(nfs3::PROGRAM, nfs3::VERSION, 18);
    header.cred = opaque_auth { flavor: 390_004, body: cred.encode().expect("encode") };
    let reply = dispatch(&dispatcher, &call_message(27, header, &FSSTAT3args::default()))
        .await
        .expect("a reply");
    let (_, body) = parse_reply(&reply);
    assert!(Reply::<v3::Fsstat>::decode(&body).expect("decode").is_ok());
}

#[tokio::test]
#[should_panic(expected = "ACCESS is not allowed to return NFS3ERR_NOTSUPP")]
async fn disallowed_status_panics_in_dispatch() {
    let args = nfs_wire::xdr::nfs3::file::ACCESS3args { object: root_fh(), access: 1 };
    let record = call_message(3, call(nfs3::PROGRAM, nfs3::VERSION, 4), &args);
    dispatch(&test_dispatcher(), &record).await;
}

#[tokio::test]
#[should_panic(expected = "LOOKUP xid 28 reply cannot be encoded")]
async fn unencodable_reply_panics_in_dispatch() {
    async fn lookup(_ctx: CallContext, _args: LOOKUP3args) -> Result<Reply<v3::Lookup>, nfsstat3> {
        Ok(Reply::ok(LOOKUP3resok {
            object: nfs_fh3 { data: vec![0; 65] },
            obj_attributes: None,
            dir_attributes: None,
        }))
    }
    let dispatcher = Dispatcher::new([v3::program().register::<v3::Lookup, _, _>(lookup)]);
    let args = LOOKUP3args { what: diropargs3 { dir: root_fh(), name: "big".into() } };
    dispatch(&dispatcher, &call_message(28, call(nfs3::PROGRAM, nfs3::VERSION, 3), &args)).await;
}
