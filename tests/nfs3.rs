mod support;

use nfs_wire::protocol::nfs::v3;
use nfs_wire::protocol::rpc::{Procedure, Reply};
use nfs_wire::xdr::nfs3::dir::{
    dirlist3, entry3, CREATE3args, LOOKUP3args, MKNOD3args, READDIR3resok,
};
use nfs_wire::xdr::nfs3::file::{stable_how, WRITE3args};
use nfs_wire::xdr::nfs3::{
    createhow3, devicedata3, diropargs3, ftype3, mknoddata3, nfs_fh3, nfsstat3, sattr3,
    specdata3, NFSProgram, NFS3_FHSIZE,
};
use nfs_wire::xdr::{Decodable, Encodable, List, XdrSize};

use support::{root_fh, sample_fattr3};

#[test]
fn lookup_call_round_trip() {
    let args = LOOKUP3args { what: diropargs3 { dir: root_fh(), name: "foo".into() } };
    let buf = args.encode().expect("encode");
    // handle: 4 + "/tmp", name: 4 + "foo" + 1 byte of padding
    assert_eq!(buf.len(), 8 + 8);
    assert_eq!(&buf[..8], [0, 0, 0, 4, b'/', b't', b'm', b'p']);
    assert_eq!(&buf[8..], [0, 0, 0, 3, b'f', b'o', b'o', 0]);

    let decoded = LOOKUP3args::decode(&buf).expect("decode");
    assert_eq!(decoded.what.dir, root_fh());
    assert_eq!(decoded.what.name.as_ref(), b"foo");
}

#[test]
fn file_handle_longer_than_64_bytes_is_rejected() {
    let mut buf = Vec::new();
    buf.extend_from_slice(&65_u32.to_be_bytes());
    buf.extend_from_slice(&[7; 68]);
    let err = nfs_fh3::decode(&buf).expect_err("handle too long");
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);

    let fh = nfs_fh3 { data: vec![1; NFS3_FHSIZE as usize] };
    assert_eq!(nfs_fh3::decode(&fh.encode().expect("encode")).expect("decode"), fh);

    let fh = nfs_fh3 { data: vec![1; NFS3_FHSIZE as usize + 1] };
    assert!(fh.encode().is_err());
}

#[test]
fn create_modes() {
    let attr = sattr3 { mode: Some(0o644), ..Default::default() };
    let dirops = diropargs3 { dir: root_fh(), name: "new".into() };
    for how in [
        createhow3::UNCHECKED(attr),
        createhow3::GUARDED(attr),
        createhow3::EXCLUSIVE([1, 2, 3, 4, 5, 6, 7, 8]),
    ] {
        let args = CREATE3args { dirops: dirops.clone(), how };
        let buf = args.encode().expect("encode");
        assert_eq!(buf.len(), args.packed_size());
        assert_eq!(CREATE3args::decode(&buf).expect("decode"), args);
    }

    let exclusive = createhow3::EXCLUSIVE([0; 8]);
    assert_eq!(exclusive.encode().expect("encode").len(), 4 + 8);
}

#[test]
fn mknod_data_follows_file_type() {
    let dev = devicedata3 {
        dev_attributes: sattr3::default(),
        spec: specdata3 { specdata1: 8, specdata2: 1 },
    };
    let cases = [
        (mknoddata3::NF3CHR(dev), 4 + 24 + 8),
        (mknoddata3::NF3BLK(dev), 4 + 24 + 8),
        (mknoddata3::NF3SOCK(sattr3::default()), 4 + 24),
        (mknoddata3::NF3FIFO(sattr3::default()), 4 + 24),
        (mknoddata3::Other(ftype3::NF3REG), 4),
    ];
    for (what, size) in cases {
        let args =
            MKNOD3args { where_dir: diropargs3 { dir: root_fh(), name: "dev".into() }, what };
        let buf = what.encode().expect("encode");
        assert_eq!(buf.len(), size, "{what:?}");
        assert_eq!(MKNOD3args::decode(&args.encode().expect("encode")).expect("decode"), args);
    }
}

#[test]
fn mknod_other_only_holds_data_free_types() {
    for ftype in [ftype3::NF3NON, ftype3::NF3REG, ftype3::NF3DIR, ftype3::NF3LNK] {
        let what = mknoddata3::Other(ftype);
        let buf = what.encode().expect("encode");
        assert_eq!(buf, (ftype as u32).to_be_bytes());
        assert_eq!(mknoddata3::decode(&buf).expect("decode"), what);
    }
    for ftype in [ftype3::NF3CHR, ftype3::NF3BLK, ftype3::NF3SOCK, ftype3::NF3FIFO] {
        let err = mknoddata3::Other(ftype).encode().expect_err("ambiguous mknod data");
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
    }
}

#[test]
fn write_args_carry_opaque_data() {
    let args = WRITE3args {
        file: root_fh(),
        offset: 1 << 33,
        count: 5,
        stable: stable_how::FILE_SYNC,
        data: b"hello".to_vec(),
    };
    let buf = args.encode().expect("encode");
    assert_eq!(buf.len(), 8 + 8 + 4 + 4 + 4 + 8);
    let decoded = WRITE3args::decode(&buf).expect("decode");
    assert_eq!(decoded, args);
    assert_eq!(decoded.offset, 1 << 33);
}

#[test]
fn readdir_reply_lists_entries() {
    let entries = vec![
        entry3 { fileid: 2, name: "a".into(), cookie: 1 },
        entry3 { fileid: 3, name: "bcde".into(), cookie: 2 },
    ];
    let reply = Reply::<v3::Readdir>::ok(READDIR3resok {
        dir_attributes: Some(sample_fattr3()),
        cookieverf: [0; 8],
        reply: dirlist3 { entries: List(entries), eof: true },
    });
    let buf = reply.encode().expect("encode");
    // status, attributes, verifier, two entries each preceded by TRUE, FALSE, eof
    let entry_a = 4 + 8 + 8 + 8;
    let entry_b = 4 + 8 + 8 + 8;
    assert_eq!(buf.len(), 4 + 4 + 84 + 8 + entry_a + entry_b + 4 + 4);
    assert_eq!(Reply::<v3::Readdir>::decode(&buf).expect("decode"), reply);
}

#[test]
fn failed_reply_defaults_to_absent_attributes() {
    let reply = Reply::<v3::Lookup>::error(nfsstat3::NFS3ERR_NOENT);
    assert_eq!(reply.resfail(), Some(&None));
    assert_eq!(reply.encode().expect("encode"), [0, 0, 0, 2, 0, 0, 0, 0]);

    let reply = Reply::<v3::Create>::error(nfsstat3::NFS3ERR_EXIST);
    assert_eq!(reply.encode().expect("encode").len(), 4 + 8);
}

#[test]
fn procedure_numbers() {
    assert_eq!(v3::Null::PROC, 0);
    assert_eq!(v3::Getattr::PROC, NFSProgram::NFSPROC3_GETATTR as u32);
    assert_eq!(v3::Lookup::PROC, 3);
    assert_eq!(v3::Readdirplus::PROC, 17);
    assert_eq!(v3::Commit::PROC, 21);
    assert_eq!(v3::Commit::NAME, "COMMIT");
}
