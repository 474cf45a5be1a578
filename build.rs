fn main() {
    glib_build_tools::compile_resources(
        &["resources"],
        "resources/escape-dialog.gresource.xml",
        "escape-dialog.gresource",
    );
}
