/// 工具函数集合

/// 验证 IPv4 地址格式（严格点分十进制）
///
/// 四段以点分隔，每段 1-3 位数字且数值不超过 255，允许前导零（如 01）
pub fn validate_ipv4_address(ip: &str) -> bool {
    let parts: Vec<&str> = ip.split('.').collect();
    if parts.len() != 4 {
        return false;
    }

    parts.iter().all(|part| {
        !part.is_empty()
            && part.len() <= 3
            && part.bytes().all(|b| b.is_ascii_digit())
            && part.parse::<u16>().map_or(false, |n| n <= 255)
    })
}
