fn main() {
    duplex_core::run();
}
