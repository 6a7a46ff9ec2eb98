//! Serves a host directory over NFS version 3.
//!
//! NFS, MOUNT and PORTMAP share one TCP port, so a client can mount with
//! `mount -t nfs -o nolock,vers=3,tcp,port=PORT,mountport=PORT ...`.

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use clap::Parser;
use tracing::info;

use nfs_wire::protocol::nfs::portmap::{self, PortmapTable};
use nfs_wire::protocol::nfs::{mount, v3};
use nfs_wire::protocol::rpc::{CallContext, Dispatcher, Program};
use nfs_wire::tcp::{RpcTcp, RpcTcpListener};
use nfs_wire::xdr::portmap::{mapping, IPPROTO_TCP};
use nfs_wire::xdr::{self, nfs3};

mod handles;
mod mirror;
mod mounts;

use mirror::MirrorFs;
use mounts::Mounts;

#[derive(Parser, Debug)]
#[command(about = "Serves a host directory over NFSv3")]
struct Args {
    /// Directory to export
    directory: PathBuf,

    /// Address to listen on, `auto:PORT` picks a free loopback address
    #[arg(long, default_value = "127.0.0.1:11111")]
    bind: String,

    /// Path clients pass to MOUNT
    #[arg(long, default_value = "/")]
    export: String,
}

/// Adapts a method of a shared service to a procedure handler.
fn route<S, A, F, Fut>(
    service: &Arc<S>,
    f: F,
) -> impl Fn(CallContext, A) -> Fut + Send + Sync + 'static
where
    S: Send + Sync + 'static,
    F: Fn(Arc<S>, CallContext, A) -> Fut + Send + Sync + 'static,
{
    let service = service.clone();
    move |ctx, args| f(service.clone(), ctx, args)
}

fn nfs_program(fs: &Arc<MirrorFs>) -> Program {
    v3::program()
        .register::<v3::Getattr, _, _>(route(fs, |fs, _, a| async move { fs.getattr(a).await }))
        .register::<v3::Setattr, _, _>(route(fs, |fs, _, a| async move { fs.setattr(a).await }))
        .register::<v3::Lookup, _, _>(route(fs, |fs, _, a| async move { fs.lookup(a).await }))
        .register::<v3::Access, _, _>(route(fs, |fs, ctx, a| async move { fs.access(ctx, a).await }))
        .register::<v3::Readlink, _, _>(route(fs, |fs, _, a| async move { fs.readlink(a).await }))
        .register::<v3::Read, _, _>(route(fs, |fs, _, a| async move { fs.read(a).await }))
        .register::<v3::Write, _, _>(route(fs, |fs, _, a| async move { fs.write(a).await }))
        .register::<v3::Create, _, _>(route(fs, |fs, _, a| async move { fs.create(a).await }))
        .register::<v3::Mkdir, _, _>(route(fs, |fs, _, a| async move { fs.mkdir(a).await }))
        .register::<v3::Symlink, _, _>(route(fs, |fs, _, a| async move { fs.symlink(a).await }))
        .register::<v3::Mknod, _, _>(route(fs, |fs, _, a| async move { fs.mknod(a).await }))
        .register::<v3::Remove, _, _>(route(fs, |fs, _, a| async move { fs.remove(a).await }))
        .register::<v3::Rmdir, _, _>(route(fs, |fs, _, a| async move { fs.rmdir(a).await }))
        .register::<v3::Rename, _, _>(route(fs, |fs, _, a| async move { fs.rename(a).await }))
        .register::<v3::Link, _, _>(route(fs, |fs, _, a| async move { fs.link(a).await }))
        .register::<v3::Readdir, _, _>(route(fs, |fs, _, a| async move { fs.readdir(a).await }))
        .register::<v3::Readdirplus, _, _>(route(fs, |fs, _, a| async move {
            fs.readdirplus(a).await
        }))
        .register::<v3::Fsstat, _, _>(route(fs, |fs, _, a| async move { fs.fsstat(a).await }))
        .register::<v3::Fsinfo, _, _>(route(fs, |fs, _, a| async move { fs.fsinfo(a).await }))
        .register::<v3::Pathconf, _, _>(route(fs, |fs, _, a| async move { fs.pathconf(a).await }))
        .register::<v3::Commit, _, _>(route(fs, |fs, _, a| async move { fs.commit(a).await }))
}

fn mount_program(mounts: &Arc<Mounts>) -> Program {
    mount::program()
        .register::<mount::Mnt, _, _>(route(mounts, |m, ctx, a| async move { m.mnt(ctx, a).await }))
        .register::<mount::Dump, _, _>(route(mounts, |m, _, ()| async move { m.dump().await }))
        .register::<mount::Umnt, _, _>(route(mounts, |m, ctx, a| async move {
            m.umnt(ctx, a).await
        }))
        .register::<mount::UmntAll, _, _>(route(mounts, |m, ctx, ()| async move {
            m.umnt_all(ctx).await
        }))
        .register::<mount::Export, _, _>(route(mounts, |m, _, ()| async move { m.export().await }))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let root = args.directory.canonicalize()?;
    let fs = Arc::new(MirrorFs::new(root.clone()));
    let mounts = Arc::new(Mounts::new(args.export.clone(), fs.clone()));
    let table = Arc::new(RwLock::new(PortmapTable::default()));

    let dispatcher = Dispatcher::new([
        nfs_program(&fs),
        mount_program(&mounts),
        portmap::program(table.clone()),
    ]);
    let listener = RpcTcpListener::bind(&args.bind, dispatcher).await?;
    let port = u32::from(listener.get_listen_port());

    if let Ok(mut table) = table.write() {
        let served = [(nfs3::PROGRAM, nfs3::VERSION), (xdr::mount::PROGRAM, xdr::mount::VERSION)];
        for (prog, vers) in served {
            table.set(&mapping { prog, vers, prot: IPPROTO_TCP, port });
        }
    }
    info!(
        "Exporting {} as {} on {}:{}",
        root.display(),
        args.export,
        listener.get_listen_ip(),
        port
    );
    listener.handle_forever().await?;
    Ok(())
}
