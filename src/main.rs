fn main() {
    mattermost_desk::run();
}
