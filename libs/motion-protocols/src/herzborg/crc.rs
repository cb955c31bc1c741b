//! CRC16 integrity check
//!
//! Reflected Modbus-style polynomial, used on the wire by Herzborg
//! controllers. The result must match the device bit-for-bit, so this is the
//! reference algorithm rather than a general-purpose hash.

/// Calculate the CRC16 checksum over a byte span (Modbus-reflected, 0xA001).
///
/// An empty span returns the initial accumulator `0xFFFF`; devices compute
/// the same degenerate value, so it is accepted for wire compatibility.
pub fn crc16(data: &[u8]) -> u16 {
    let mut crc: u16 = 0xFFFF;

    for &byte in data {
        crc ^= u16::from(byte);
        for _ in 0..8 {
            if crc & 1 != 0 {
                crc >>= 1;
                crc ^= 0xA001;
            } else {
                crc >>= 1;
            }
        }
    }

    crc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crc16_known_vector() {
        // Standard Modbus reference vector
        let data = [0x01, 0x03, 0x00, 0x00, 0x00, 0x01];
        assert_eq!(crc16(&data), 0x0A84);
    }

    #[test]
    fn test_crc16_control_headers() {
        // Pinned fixtures; any algorithm drift breaks wire compatibility
        assert_eq!(crc16(&[0x55, 0x01, 0x00, 0x03, 0x00]), 0x0029);
        assert_eq!(crc16(&[0x55, 0x01, 0x00, 0x03, 0x01]), 0xC0E8);
    }

    #[test]
    fn test_crc16_empty_data() {
        assert_eq!(crc16(&[]), 0xFFFF); // Initial value when no data processed
    }

    #[test]
    fn test_crc16_single_byte() {
        // One byte still runs the full 8 shift rounds
        assert_eq!(crc16(&[0x00]), 0x40BF);
    }

    #[test]
    fn test_crc16_consistency() {
        let data = [0x55, 0x01, 0x00, 0x01, 0x02];
        assert_eq!(crc16(&data), crc16(&data));
    }

    #[test]
    fn test_crc16_sensitivity() {
        let data = [0x55, 0x01, 0x00, 0x03, 0x00];
        let base = crc16(&data);

        // Flipping any single bit must change the checksum
        for i in 0..data.len() {
            for bit in 0..8 {
                let mut corrupted = data;
                corrupted[i] ^= 1 << bit;
                assert_ne!(
                    crc16(&corrupted),
                    base,
                    "bit {} of byte {} did not affect CRC",
                    bit,
                    i
                );
            }
        }
    }
}
