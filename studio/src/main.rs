fn main() {
    studio::run_studio_app();
}
