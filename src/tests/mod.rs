mod connection;

use embedded_hal_mock::eh0::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

use crate::interface::{I2cInterface, RegisterInterface};

#[test]
fn i2c_register_framing() {
    // Configure expectations
    let expectations = [
        I2cTransaction::write(0x29, vec![0x01, 0x0A, 0x30]),
        I2cTransaction::write(0x29, vec![0x00, 0x1E, 0x12, 0x34]),
        I2cTransaction::write_read(0x29, vec![0x00, 0x4F], vec![0x04]),
        I2cTransaction::write_read(0x29, vec![0x00, 0x50], vec![0x10, 0x02]),
    ];
    let mut i2c = I2cMock::new(&expectations);
    let mut iface = I2cInterface::new(i2c.clone(), 0x29);

    // Writing, address high byte first
    iface.write_u8(0x010A, 0x30).unwrap();
    iface.write_u16(0x001E, 0x1234).unwrap();

    // Reading
    assert_eq!(iface.read_u8(0x004F).unwrap(), 0x04);
    assert_eq!(iface.read_u16(0x0050).unwrap(), 0x0210);

    assert_eq!(iface.address(), 0x29);

    // Finalise expectations
    i2c.done();
}

#[test]
fn i2c_word_write_sends_every_byte() {
    let expectations = [
        I2cTransaction::write(0x29, vec![0x00, 0x10, 0xAB, 0xCD]),
        I2cTransaction::write_read(0x29, vec![0x00, 0x10], vec![0x01, 0x02, 0x03]),
    ];
    let mut i2c = I2cMock::new(&expectations);
    let mut iface = I2cInterface::new(i2c.clone(), 0x29);

    iface.write_u16(0x0010, 0xABCD).unwrap();

    // reads are sized by the caller's buffer
    let mut buf = [0u8; 3];
    iface.read_register(0x0010, &mut buf).unwrap();
    assert_eq!(buf, [0x01, 0x02, 0x03]);

    i2c.done();
}
