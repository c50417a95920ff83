/// Build script for CastleRender
///
/// The WGSL shader is embedded with include_str!, but we still trigger a
/// rebuild explicitly when it changes.
fn main() {
    println!("cargo:rerun-if-changed=src/renderer/shaders/castle.wgsl");
}
