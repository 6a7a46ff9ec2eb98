//! NFS version 3 procedures served from a host directory.

use std::ffi::{OsStr, OsString};
use std::io::{self, SeekFrom};
use std::os::unix::ffi::{OsStrExt, OsStringExt};
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tokio::fs::{self, File, OpenOptions};
use tokio::io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt};
use tracing::debug;

use nfs_wire::fs_util::{metadata_to_fattr3, path_setattr};
use nfs_wire::protocol::nfs::error::{allowed_or_serverfault, NFSResult, ResultExt};
use nfs_wire::protocol::nfs::v3;
use nfs_wire::protocol::rpc::{CallContext, Reply, StatusProcedure};
use nfs_wire::xdr::nfs3::dir::*;
use nfs_wire::xdr::nfs3::file::*;
use nfs_wire::xdr::nfs3::fs::*;
use nfs_wire::xdr::nfs3::*;
use nfs_wire::xdr::rpc::auth_unix;
use nfs_wire::xdr::{List, XdrSize};

use crate::handles::{HandleTable, ROOT_ID};

/// Largest READ or WRITE transfer
const MAX_IO: u32 = 1024 * 1024;

/// Longest file name accepted
const NAME_MAX: usize = 255;

/// Bytes of a READDIR reply besides the entries: status, directory
/// attributes, verifier, list terminator and eof flag
const READDIR_OVERHEAD: usize = 4 + 4 + fattr3::XDR_SIZE + 8 + 4 + 4;

type Res<P> = Result<Reply<P>, nfsstat3>;

/// Status of a host error, limited to what procedure `P` may return.
fn status_for<P>(err: &io::Error) -> nfsstat3
where
    P: StatusProcedure<Status = nfsstat3>,
{
    let status = match err.kind() {
        io::ErrorKind::AlreadyExists => nfsstat3::NFS3ERR_EXIST,
        io::ErrorKind::DirectoryNotEmpty => nfsstat3::NFS3ERR_NOTEMPTY,
        io::ErrorKind::IsADirectory => nfsstat3::NFS3ERR_ISDIR,
        io::ErrorKind::ReadOnlyFilesystem => nfsstat3::NFS3ERR_ROFS,
        io::ErrorKind::StorageFull => nfsstat3::NFS3ERR_NOSPC,
        io::ErrorKind::InvalidInput => nfsstat3::NFS3ERR_INVAL,
        _ => nfsstat3::from(err),
    };
    allowed_or_serverfault::<P>(status)
}

/// Mirrors a host directory. File ids are allocated as paths are first seen.
#[derive(Debug)]
pub struct MirrorFs {
    root: PathBuf,
    handles: RwLock<HandleTable>,
}

impl MirrorFs {
    pub fn new(root: PathBuf) -> Self {
        let handles = RwLock::new(HandleTable::new(root.clone()));
        Self { root, handles }
    }

    fn handles(&self) -> RwLockReadGuard<'_, HandleTable> {
        self.handles.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn handles_mut(&self) -> RwLockWriteGuard<'_, HandleTable> {
        self.handles.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn root_handle(&self) -> nfs_fh3 {
        self.handles().handle(ROOT_ID)
    }

    fn handle_of(&self, path: &Path) -> (fileid3, nfs_fh3) {
        let mut handles = self.handles_mut();
        let id = handles.id_of_path(path);
        (id, handles.handle(id))
    }

    fn verifier(&self) -> writeverf3 {
        self.handles().generation().to_be_bytes()
    }

    fn resolve(&self, fh: &nfs_fh3) -> NFSResult<(fileid3, PathBuf)> {
        let handles = self.handles();
        let id = handles.id_of_handle(fh)?;
        Ok((id, handles.path(id)?))
    }

    /// A handle whose file vanished from the host is stale.
    async fn attr<P>(&self, id: fileid3, path: &Path) -> NFSResult<fattr3>
    where
        P: StatusProcedure<Status = nfsstat3>,
    {
        match fs::symlink_metadata(path).await {
            Ok(meta) => Ok(metadata_to_fattr3(id, &meta)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(nfsstat3::NFS3ERR_STALE),
            Err(e) => Err(status_for::<P>(&e)),
        }
    }

    async fn post_op(&self, id: fileid3, path: &Path) -> post_op_attr {
        fs::symlink_metadata(path).await.ok().map(|meta| metadata_to_fattr3(id, &meta))
    }

    async fn wcc(&self, id: fileid3, path: &Path, before: &fattr3) -> wcc_data {
        wcc_data { before: Some(wcc_attr::from(before)), after: self.post_op(id, path).await }
    }

    /// Path of entry `name` in `dir`. Names must be single path components.
    fn child(&self, dir: &Path, name: &filename3) -> NFSResult<PathBuf> {
        if name.len() > NAME_MAX {
            return Err(nfsstat3::NFS3ERR_NAMETOOLONG);
        }
        if name.is_empty() || name.contains(&b'/') || name[..] == b"."[..] || name[..] == b".."[..]
        {
            return Err(nfsstat3::NFS3ERR_ACCES);
        }
        Ok(dir.join(OsStr::from_bytes(name)))
    }

    fn parent(&self, dir: &Path) -> PathBuf {
        match dir.parent() {
            Some(parent) if dir != self.root => parent.to_path_buf(),
            _ => self.root.clone(),
        }
    }

    /// Resolves the directory of a directory operation and stats it.
    async fn dir_of<P>(&self, dirops: &diropargs3) -> NFSResult<(fileid3, PathBuf, fattr3)>
    where
        P: StatusProcedure<Status = nfsstat3>,
    {
        let (id, dir) = self.resolve(&dirops.dir)?;
        let attr = self.attr::<P>(id, &dir).await?;
        if attr.ftype != ftype3::NF3DIR {
            return Err(allowed_or_serverfault::<P>(nfsstat3::NFS3ERR_NOTDIR));
        }
        Ok((id, dir, attr))
    }

    pub async fn getattr(&self, args: GETATTR3args) -> Res<v3::Getattr> {
        let (id, path) = self.resolve(&args.object)?;
        let attr = self.attr::<v3::Getattr>(id, &path).await?;
        Ok(Reply::ok(GETATTR3resok { obj_attributes: attr }))
    }

    pub async fn setattr(&self, args: SETATTR3args) -> Res<v3::Setattr> {
        let (id, path) = self.resolve(&args.object)?;
        let before = self.attr::<v3::Setattr>(id, &path).await?;
        if let Some(guard) = args.guard {
            if guard != before.ctime {
                let wcc = self.wcc(id, &path, &before).await;
                return Ok(Reply::fail(nfsstat3::NFS3ERR_NOT_SYNC, wcc));
            }
        }
        let result = path_setattr(&path, &args.new_attributes).await;
        let obj_wcc = self.wcc(id, &path, &before).await;
        Ok(match result {
            Ok(()) => Reply::ok(SETATTR3resok { obj_wcc }),
            Err(e) => Reply::fail(status_for::<v3::Setattr>(&e), obj_wcc),
        })
    }

    pub async fn lookup(&self, args: LOOKUP3args) -> Res<v3::Lookup> {
        let (dir_id, dir) = self.resolve(&args.what.dir)?;
        let dir_attr = self.attr::<v3::Lookup>(dir_id, &dir).await?;
        if dir_attr.ftype != ftype3::NF3DIR {
            return Ok(Reply::fail(nfsstat3::NFS3ERR_NOTDIR, Some(dir_attr)));
        }
        let path = match &args.what.name[..] {
            b"." => dir.clone(),
            b".." => self.parent(&dir),
            _ => self.child(&dir, &args.what.name)?,
        };
        let meta = match fs::symlink_metadata(&path).await {
            Ok(meta) => meta,
            Err(e) => return Ok(Reply::fail(status_for::<v3::Lookup>(&e), Some(dir_attr))),
        };
        let (id, object) = self.handle_of(&path);
        Ok(Reply::ok(LOOKUP3resok {
            object,
            obj_attributes: Some(metadata_to_fattr3(id, &meta)),
            dir_attributes: Some(dir_attr),
        }))
    }

    pub async fn access(&self, ctx: CallContext, args: ACCESS3args) -> Res<v3::Access> {
        let (id, path) = self.resolve(&args.object)?;
        let attr = self.attr::<v3::Access>(id, &path).await?;
        let access = granted_access(&attr, ctx.auth.as_ref(), args.access);
        Ok(Reply::ok(ACCESS3resok { obj_attributes: Some(attr), access }))
    }

    pub async fn readlink(&self, args: READLINK3args) -> Res<v3::Readlink> {
        let (id, path) = self.resolve(&args.symlink)?;
        let attr = self.attr::<v3::Readlink>(id, &path).await?;
        if attr.ftype != ftype3::NF3LNK {
            return Ok(Reply::fail(nfsstat3::NFS3ERR_INVAL, Some(attr)));
        }
        let target = fs::read_link(&path).await.or_nfs_error_for::<v3::Readlink>()?;
        Ok(Reply::ok(READLINK3resok {
            symlink_attributes: Some(attr),
            data: target.into_os_string().into_vec().into(),
        }))
    }

    pub async fn read(&self, args: READ3args) -> Res<v3::Read> {
        let (id, path) = self.resolve(&args.file)?;
        let attr = self.attr::<v3::Read>(id, &path).await?;
        if attr.ftype != ftype3::NF3REG {
            return Ok(Reply::fail(nfsstat3::NFS3ERR_INVAL, Some(attr)));
        }
        let mut data = Vec::new();
        let result = async {
            let mut file = File::open(&path).await?;
            file.seek(SeekFrom::Start(args.offset)).await?;
            file.take(args.count.min(MAX_IO) as u64).read_to_end(&mut data).await
        }
        .await;
        let file_attributes = self.post_op(id, &path).await;
        if let Err(e) = result {
            return Ok(Reply::fail(status_for::<v3::Read>(&e), file_attributes));
        }
        let size = file_attributes.map_or(attr.size, |a| a.size);
        Ok(Reply::ok(READ3resok {
            file_attributes,
            count: data.len() as u32,
            eof: args.offset.saturating_add(data.len() as u64) >= size,
            data,
        }))
    }

    pub async fn write(&self, args: WRITE3args) -> Res<v3::Write> {
        let (id, path) = self.resolve(&args.file)?;
        let before = self.attr::<v3::Write>(id, &path).await?;
        if before.ftype != ftype3::NF3REG {
            let wcc = self.wcc(id, &path, &before).await;
            return Ok(Reply::fail(nfsstat3::NFS3ERR_INVAL, wcc));
        }
        let count = (args.count as usize).min(args.data.len());
        let data = &args.data[..count];
        let result = async {
            let mut file = OpenOptions::new().write(true).open(&path).await?;
            file.seek(SeekFrom::Start(args.offset)).await?;
            file.write_all(data).await?;
            if args.stable != stable_how::UNSTABLE {
                file.sync_all().await?;
            }
            Ok::<_, io::Error>(())
        }
        .await;
        let file_wcc = self.wcc(id, &path, &before).await;
        Ok(match result {
            Ok(()) => Reply::ok(WRITE3resok {
                file_wcc,
                count: count as u32,
                committed: match args.stable {
                    stable_how::UNSTABLE => stable_how::UNSTABLE,
                    _ => stable_how::FILE_SYNC,
                },
                verf: self.verifier(),
            }),
            Err(e) => Reply::fail(status_for::<v3::Write>(&e), file_wcc),
        })
    }

    /// Reply of an operation that created `path` in `dir`.
    async fn created<P>(
        &self,
        dir_id: fileid3,
        dir: &Path,
        dir_before: &fattr3,
        path: &Path,
        result: io::Result<()>,
    ) -> Reply<P>
    where
        P: StatusProcedure<Status = nfsstat3, ResOk = diropres3ok, ResFail = wcc_data>,
    {
        let dir_wcc = self.wcc(dir_id, dir, dir_before).await;
        if let Err(e) = result {
            return Reply::fail(status_for::<P>(&e), dir_wcc);
        }
        let (id, fh) = self.handle_of(path);
        let obj_attributes = self.post_op(id, path).await;
        Reply::ok(diropres3ok { obj: Some(fh), obj_attributes, dir_wcc })
    }

    pub async fn create(&self, args: CREATE3args) -> Res<v3::Create> {
        let (dir_id, dir, dir_before) = self.dir_of::<v3::Create>(&args.dirops).await?;
        let path = self.child(&dir, &args.dirops.name)?;
        let mut options = OpenOptions::new();
        options.write(true);
        let attributes = match args.how {
            createhow3::UNCHECKED(attr) => {
                options.create(true);
                Some(attr)
            }
            createhow3::GUARDED(attr) => {
                options.create_new(true);
                Some(attr)
            }
            createhow3::EXCLUSIVE(_) => {
                options.create_new(true);
                None
            }
        };
        let result = async {
            options.open(&path).await?;
            match attributes {
                Some(attr) => path_setattr(&path, &attr).await,
                None => Ok(()),
            }
        }
        .await;
        Ok(self.created(dir_id, &dir, &dir_before, &path, result).await)
    }

    pub async fn mkdir(&self, args: MKDIR3args) -> Res<v3::Mkdir> {
        let (dir_id, dir, dir_before) = self.dir_of::<v3::Mkdir>(&args.dirops).await?;
        let path = self.child(&dir, &args.dirops.name)?;
        let result = async {
            fs::create_dir(&path).await?;
            path_setattr(&path, &args.attributes).await
        }
        .await;
        Ok(self.created(dir_id, &dir, &dir_before, &path, result).await)
    }

    pub async fn symlink(&self, args: SYMLINK3args) -> Res<v3::Symlink> {
        let (dir_id, dir, dir_before) = self.dir_of::<v3::Symlink>(&args.dirops).await?;
        let path = self.child(&dir, &args.dirops.name)?;
        let target = OsStr::from_bytes(&args.symlink.symlink_data);
        let result = fs::symlink(target, &path).await;
        Ok(self.created(dir_id, &dir, &dir_before, &path, result).await)
    }

    pub async fn mknod(&self, args: MKNOD3args) -> Res<v3::Mknod> {
        debug!("mknod of {:?} is not supported", args.what.ftype());
        Err(nfsstat3::NFS3ERR_NOTSUPP)
    }

    pub async fn remove(&self, args: REMOVE3args) -> Res<v3::Remove> {
        let (dir_id, dir, dir_before) = self.dir_of::<v3::Remove>(&args.object).await?;
        let path = self.child(&dir, &args.object.name)?;
        let result = fs::remove_file(&path).await;
        if result.is_ok() {
            self.handles_mut().forget(&path);
        }
        let dir_wcc = self.wcc(dir_id, &dir, &dir_before).await;
        Ok(match result {
            Ok(()) => Reply::ok(REMOVE3resok { dir_wcc }),
            Err(e) => Reply::fail(status_for::<v3::Remove>(&e), dir_wcc),
        })
    }

    pub async fn rmdir(&self, args: RMDIR3args) -> Res<v3::Rmdir> {
        let (dir_id, dir, dir_before) = self.dir_of::<v3::Rmdir>(&args.object).await?;
        let path = self.child(&dir, &args.object.name)?;
        let result = fs::remove_dir(&path).await;
        if result.is_ok() {
            self.handles_mut().forget(&path);
        }
        let dir_wcc = self.wcc(dir_id, &dir, &dir_before).await;
        Ok(match result {
            Ok(()) => Reply::ok(REMOVE3resok { dir_wcc }),
            Err(e) => Reply::fail(status_for::<v3::Rmdir>(&e), dir_wcc),
        })
    }

    pub async fn rename(&self, args: RENAME3args) -> Res<v3::Rename> {
        let (from_id, from_dir, from_before) = self.dir_of::<v3::Rename>(&args.from).await?;
        let (to_id, to_dir, to_before) = self.dir_of::<v3::Rename>(&args.to).await?;
        let from = self.child(&from_dir, &args.from.name)?;
        let to = self.child(&to_dir, &args.to.name)?;
        let result = fs::rename(&from, &to).await;
        if result.is_ok() {
            self.handles_mut().rename(&from, &to);
        }
        let wcc = RENAME3wcc {
            fromdir_wcc: self.wcc(from_id, &from_dir, &from_before).await,
            todir_wcc: self.wcc(to_id, &to_dir, &to_before).await,
        };
        Ok(match result {
            Ok(()) => Reply::ok(wcc),
            Err(e) => Reply::fail(status_for::<v3::Rename>(&e), wcc),
        })
    }

    pub async fn link(&self, args: LINK3args) -> Res<v3::Link> {
        let (file_id, file) = self.resolve(&args.file)?;
        let (dir_id, dir, dir_before) = self.dir_of::<v3::Link>(&args.link).await?;
        let path = self.child(&dir, &args.link.name)?;
        let result = fs::hard_link(&file, &path).await;
        let wcc = LINK3wcc {
            file_attributes: self.post_op(file_id, &file).await,
            linkdir_wcc: self.wcc(dir_id, &dir, &dir_before).await,
        };
        Ok(match result {
            Ok(()) => Reply::ok(wcc),
            Err(e) => Reply::fail(status_for::<v3::Link>(&e), wcc),
        })
    }

    /// Entry names of `dir`, sorted so cookies stay stable between calls.
    async fn list(&self, dir: &Path) -> io::Result<Vec<OsString>> {
        let mut names = Vec::new();
        let mut entries = fs::read_dir(dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            names.push(entry.file_name());
        }
        names.sort();
        Ok(names)
    }

    /// Checks the directory and the verifier of a READDIR or READDIRPLUS call.
    async fn open_dir<P>(
        &self,
        fh: &nfs_fh3,
        cookie: cookie3,
        cookieverf: &cookieverf3,
    ) -> Result<(PathBuf, fattr3, cookieverf3), Reply<P>>
    where
        P: StatusProcedure<Status = nfsstat3, ResFail = post_op_attr>,
    {
        let dir_status = |status| Reply::<P>::error(allowed_or_serverfault::<P>(status));
        let (id, dir) = self.resolve(fh).map_err(dir_status)?;
        let attr = self.attr::<P>(id, &dir).await.map_err(dir_status)?;
        if attr.ftype != ftype3::NF3DIR {
            return Err(Reply::fail(nfsstat3::NFS3ERR_NOTDIR, Some(attr)));
        }
        let verf = (((attr.mtime.seconds as u64) << 32) | attr.mtime.nseconds as u64).to_be_bytes();
        if cookie != 0 && *cookieverf != cookieverf3::default() && *cookieverf != verf {
            return Err(Reply::fail(nfsstat3::NFS3ERR_BAD_COOKIE, Some(attr)));
        }
        Ok((dir, attr, verf))
    }

    pub async fn readdir(&self, args: READDIR3args) -> Res<v3::Readdir> {
        let (dir, dir_attr, cookieverf) =
            match self.open_dir(&args.dir, args.cookie, &args.cookieverf).await {
                Ok(opened) => opened,
                Err(reply) => return Ok(reply),
            };
        let names = self.list(&dir).await.or_nfs_error_for::<v3::Readdir>()?;

        let mut entries = Vec::new();
        let mut size = READDIR_OVERHEAD;
        let mut eof = true;
        for (index, name) in names.iter().enumerate().skip(args.cookie as usize) {
            let (fileid, _) = self.handle_of(&dir.join(name));
            let entry = entry3 { fileid, name: name.as_bytes().into(), cookie: index as u64 + 1 };
            size += 4 + entry.packed_size();
            if size > args.count as usize {
                eof = false;
                break;
            }
            entries.push(entry);
        }
        if entries.is_empty() && !eof {
            return Ok(Reply::fail(nfsstat3::NFS3ERR_TOOSMALL, Some(dir_attr)));
        }
        Ok(Reply::ok(READDIR3resok {
            dir_attributes: Some(dir_attr),
            cookieverf,
            reply: dirlist3 { entries: List(entries), eof },
        }))
    }

    pub async fn readdirplus(&self, args: READDIRPLUS3args) -> Res<v3::Readdirplus> {
        let (dir, dir_attr, cookieverf) =
            match self.open_dir(&args.dir, args.cookie, &args.cookieverf).await {
                Ok(opened) => opened,
                Err(reply) => return Ok(reply),
            };
        let names = self.list(&dir).await.or_nfs_error_for::<v3::Readdirplus>()?;

        let mut entries = Vec::new();
        let mut size = READDIR_OVERHEAD;
        let mut dircount = 0;
        let mut eof = true;
        for (index, name) in names.iter().enumerate().skip(args.cookie as usize) {
            let path = dir.join(name);
            let (fileid, fh) = self.handle_of(&path);
            let entry = entryplus3 {
                fileid,
                name: name.as_bytes().into(),
                cookie: index as u64 + 1,
                name_attributes: self.post_op(fileid, &path).await,
                name_handle: Some(fh),
            };
            size += 4 + entry.packed_size();
            dircount += 8 + entry.name.packed_size() + 8;
            if size > args.maxcount as usize || dircount > args.dircount as usize {
                eof = false;
                break;
            }
            entries.push(entry);
        }
        if entries.is_empty() && !eof {
            return Ok(Reply::fail(nfsstat3::NFS3ERR_TOOSMALL, Some(dir_attr)));
        }
        Ok(Reply::ok(READDIRPLUS3resok {
            dir_attributes: Some(dir_attr),
            cookieverf,
            reply: dirlistplus3 { entries: List(entries), eof },
        }))
    }

    pub async fn fsstat(&self, args: FSSTAT3args) -> Res<v3::Fsstat> {
        let (id, path) = self.resolve(&args.fsroot)?;
        Ok(Reply::ok(FSSTAT3resok {
            obj_attributes: self.post_op(id, &path).await,
            tbytes: 1024 * 1024 * 1024 * 1024,
            fbytes: 1024 * 1024 * 1024 * 1024,
            abytes: 1024 * 1024 * 1024 * 1024,
            tfiles: 1024 * 1024 * 1024,
            ffiles: 1024 * 1024 * 1024,
            afiles: 1024 * 1024 * 1024,
            invarsec: u32::MAX,
        }))
    }

    pub async fn fsinfo(&self, args: FSINFO3args) -> Res<v3::Fsinfo> {
        let (id, path) = self.resolve(&args.fsroot)?;
        Ok(Reply::ok(fsinfo3 {
            obj_attributes: self.post_op(id, &path).await,
            rtmax: MAX_IO,
            rtpref: 128 * 1024,
            rtmult: 4096,
            wtmax: MAX_IO,
            wtpref: 128 * 1024,
            wtmult: 4096,
            dtpref: 64 * 1024,
            maxfilesize: u64::MAX >> 1,
            time_delta: nfstime3 { seconds: 0, nseconds: 1 },
            properties: FSF_LINK | FSF_SYMLINK | FSF_HOMOGENEOUS | FSF_CANSETTIME,
        }))
    }

    pub async fn pathconf(&self, args: PATHCONF3args) -> Res<v3::Pathconf> {
        let (id, path) = self.resolve(&args.fsroot)?;
        Ok(Reply::ok(PATHCONF3resok {
            obj_attributes: self.post_op(id, &path).await,
            linkmax: 0,
            name_max: NAME_MAX as u32,
            no_trunc: true,
            chown_restricted: true,
            case_insensitive: false,
            case_preserving: true,
        }))
    }

    pub async fn commit(&self, args: COMMIT3args) -> Res<v3::Commit> {
        let (id, path) = self.resolve(&args.file)?;
        let before = self.attr::<v3::Commit>(id, &path).await?;
        let result = async { File::open(&path).await?.sync_all().await }.await;
        let file_wcc = self.wcc(id, &path, &before).await;
        Ok(match result {
            Ok(()) => Reply::ok(COMMIT3resok { file_wcc, verf: self.verifier() }),
            Err(e) => Reply::fail(status_for::<v3::Commit>(&e), file_wcc),
        })
    }
}

/// Access bits of `requested` that the mode of `attr` grants the caller.
///
/// Callers without AUTH_UNIX credentials get the "other" permissions and
/// uid 0 gets everything.
fn granted_access(attr: &fattr3, auth: Option<&auth_unix>, requested: u32) -> u32 {
    let shift = match auth {
        Some(auth) if auth.uid == 0 => return requested,
        Some(auth) if auth.uid == attr.uid => 6,
        Some(auth) if auth.gid == attr.gid || auth.gids.contains(&attr.gid) => 3,
        _ => 0,
    };
    let bits = (attr.mode >> shift) & 0o7;
    let mut granted = 0;
    if bits & 0o4 != 0 {
        granted |= ACCESS3_READ;
    }
    if bits & 0o2 != 0 {
        granted |= ACCESS3_MODIFY | ACCESS3_EXTEND | ACCESS3_DELETE;
    }
    if bits & 0o1 != 0 {
        granted |= ACCESS3_LOOKUP | ACCESS3_EXECUTE;
    }
    requested & granted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_group_and_other_bits() {
        let attr = fattr3 { mode: 0o754, uid: 10, gid: 20, ..Default::default() };
        let all = ACCESS3_READ | ACCESS3_MODIFY | ACCESS3_EXECUTE;
        let user = |uid, gid| auth_unix { uid, gid, ..Default::default() };
        assert_eq!(granted_access(&attr, Some(&user(10, 0)), all), all);
        assert_eq!(granted_access(&attr, Some(&user(11, 20)), all), ACCESS3_READ | ACCESS3_EXECUTE);
        assert_eq!(granted_access(&attr, None, all), ACCESS3_READ);
        assert_eq!(granted_access(&attr, Some(&user(0, 0)), all), all);
    }
}
