//! Lists the programs registered with a port mapper, like `rpcinfo -p`.

use clap::Parser;
use tracing::debug;

use nfs_wire::protocol::nfs::portmap;
use nfs_wire::protocol::rpc::RpcClient;
use nfs_wire::xdr::portmap::{mapping, IPPROTO_TCP, IPPROTO_UDP, PMAP_PORT, PROGRAM, VERSION};
use nfs_wire::xdr::{mount, nfs3};

#[derive(Parser, Debug)]
#[command(about = "Queries a PORTMAP version 2 server over TCP")]
struct Args {
    /// Server address
    #[arg(default_value_t = format!("127.0.0.1:{PMAP_PORT}"))]
    server: String,

    /// Only print the port of this program number
    #[arg(long)]
    program: Option<u32>,

    /// Version used with --program
    #[arg(long, default_value_t = 3)]
    version: u32,
}

fn program_name(prog: u32) -> &'static str {
    match prog {
        PROGRAM => "portmapper",
        nfs3::PROGRAM => "nfs",
        mount::PROGRAM => "mountd",
        _ => "",
    }
}

fn protocol_name(prot: u32) -> String {
    match prot {
        IPPROTO_TCP => "tcp".to_string(),
        IPPROTO_UDP => "udp".to_string(),
        other => other.to_string(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let args = Args::parse();
    let mut client = RpcClient::connect(args.server.as_str()).await?;
    client.null(PROGRAM, VERSION).await?;
    debug!("{} answers PORTMAP version {}", args.server, VERSION);

    if let Some(prog) = args.program {
        let query = mapping { prog, vers: args.version, prot: IPPROTO_TCP, port: 0 };
        let port = client.call::<portmap::Getport>(PROGRAM, VERSION, &query).await?;
        if port == 0 {
            anyhow::bail!("program {prog} version {} is not registered", args.version);
        }
        println!("{port}");
        return Ok(());
    }

    let list = client.call::<portmap::Dump>(PROGRAM, VERSION, &()).await?;
    println!("{:>10} {:>5} {:>6} {:>6}  service", "program", "vers", "proto", "port");
    for m in list.0 {
        println!(
            "{:>10} {:>5} {:>6} {:>6}  {}",
            m.prog,
            m.vers,
            protocol_name(m.prot),
            m.port,
            program_name(m.prog)
        );
    }
    Ok(())
}
