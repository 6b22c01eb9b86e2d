fn main() -> Result<(), Box<dyn std::error::Error>> {
    uav_deploy::sweep::run()
}
