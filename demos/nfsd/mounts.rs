//! MOUNT version 3 procedures for a single export.

use std::convert::Infallible;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::info;

use nfs_wire::protocol::nfs::mount::Mnt;
use nfs_wire::protocol::rpc::{CallContext, Reply};
use nfs_wire::xdr::mount::{
    dirpath, exportnode, exports, mountbody, mountlist, mountres3_ok, mountstat3,
};
use nfs_wire::xdr::rpc::auth_flavor;
use nfs_wire::xdr::List;

use crate::mirror::MirrorFs;

/// The export and the clients that mounted it.
#[derive(Debug)]
pub struct Mounts {
    export: String,
    fs: Arc<MirrorFs>,
    clients: Mutex<Vec<mountbody>>,
}

/// Host part of a `host:port` client address
fn client_host(ctx: &CallContext) -> &str {
    ctx.client_addr.rsplit_once(':').map_or(ctx.client_addr.as_str(), |(host, _)| host)
}

impl Mounts {
    pub fn new(export: String, fs: Arc<MirrorFs>) -> Self {
        Self { export, fs, clients: Mutex::new(Vec::new()) }
    }

    fn clients(&self) -> std::sync::MutexGuard<'_, Vec<mountbody>> {
        self.clients.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub async fn mnt(&self, ctx: CallContext, path: dirpath) -> Result<Reply<Mnt>, mountstat3> {
        if path.as_ref() != self.export.as_bytes() {
            info!("{} asked for unknown export {}", ctx.client_addr, path);
            return Err(mountstat3::MNT3ERR_NOENT);
        }
        let entry = mountbody { ml_hostname: client_host(&ctx).into(), ml_directory: path };
        let mut clients = self.clients();
        if !clients.contains(&entry) {
            clients.push(entry);
        }
        info!("{} mounted {}", ctx.client_addr, self.export);
        Ok(Reply::ok(mountres3_ok {
            fhandle: self.fs.root_handle(),
            auth_flavors: vec![auth_flavor::AUTH_NULL as u32, auth_flavor::AUTH_UNIX as u32],
        }))
    }

    pub async fn dump(&self) -> Result<mountlist, Infallible> {
        Ok(List(self.clients().clone()))
    }

    pub async fn umnt(&self, ctx: CallContext, path: dirpath) -> Result<(), Infallible> {
        let host = client_host(&ctx);
        self.clients()
            .retain(|m| m.ml_hostname.as_ref() != host.as_bytes() || m.ml_directory != path);
        info!("{} unmounted {}", ctx.client_addr, path);
        Ok(())
    }

    pub async fn umnt_all(&self, ctx: CallContext) -> Result<(), Infallible> {
        let host = client_host(&ctx);
        self.clients().retain(|m| m.ml_hostname.as_ref() != host.as_bytes());
        Ok(())
    }

    pub async fn export(&self) -> Result<exports, Infallible> {
        Ok(List(vec![exportnode { ex_dir: self.export.as_str().into(), ex_groups: List::default() }]))
    }
}
