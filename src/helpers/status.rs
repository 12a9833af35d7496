/// 2xx codes the token endpoint may answer with on success.
/// 209..=225 and 227..=299 are not part of the set.
pub const SUCCESS_STATUS_CODES: [u16; 10] = [200, 201, 202, 203, 204, 205, 206, 207, 208, 226];

pub fn is_success(status: u16) -> bool {
    SUCCESS_STATUS_CODES.contains(&status)
}
