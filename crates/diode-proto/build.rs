fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Use a vendored `protoc` binary so the build does not depend on a
    // system-installed protobuf compiler.
    if std::env::var_os("PROTOC").is_none() {
        if let Ok(protoc) = protoc_bin_vendored::protoc_bin_path() {
            unsafe {
                std::env::set_var("PROTOC", protoc);
            }
        }
    }

    // Compile the diode.v1 ingestion surface (IngesterService + entity
    // messages). Device, IPAddress and Interface reference each other in a
    // cycle, so the Device side of the cycle is boxed.
    tonic_prost_build::configure()
        .build_server(true)
        .build_client(true)
        .boxed("Device.primary_ip4")
        .boxed("Device.primary_ip6")
        .compile_protos(&["proto/ingester.proto"], &["proto/"])?;

    // Rebuild if the proto file changes
    println!("cargo:rerun-if-changed=proto/ingester.proto");

    Ok(())
}
