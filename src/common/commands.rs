/// Lệnh UI gửi xuống engine đồng bộ.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    /// Gửi bản nháp hiện tại với tên hiển thị của phiên.
    Submit,
}
